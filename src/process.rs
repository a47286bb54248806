//! External process runner.
//!
//! The pipeline shells out for every heavy operation (cooking, staging,
//! console packaging). The runner never interprets the child's output; it
//! reports the exit status and the caller decides whether that aborts the
//! pipeline.
//!
//! Cooking can legitimately run unattended for tens of minutes without
//! printing anything, which build-farm watchdogs treat as a hang. With a
//! heartbeat interval set, the runner waits in a polling loop and emits a
//! liveness line at that cadence until the child exits.

use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::{Command, ExitStatus};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Granularity of the polling wait; heartbeats cannot be more frequent.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run `command` to completion and return its exit status.
///
/// `tool` names the invocation in logs and errors. With `heartbeat` set, a
/// liveness line is emitted at that cadence while the child runs.
pub fn call(tool: &str, command: &mut Command, heartbeat: Option<Duration>) -> Result<ExitStatus> {
    debug!("running {}: {:?}", tool, command);
    let program = PathBuf::from(command.get_program());
    let mut child = command
        .spawn()
        .map_err(|source| Error::io("spawning", program.clone(), source))?;

    let status = match heartbeat {
        None => child
            .wait()
            .map_err(|source| Error::io("waiting on", program.clone(), source))?,
        Some(interval) => {
            let mut last_beat = Instant::now();
            loop {
                match child
                    .try_wait()
                    .map_err(|source| Error::io("waiting on", program.clone(), source))?
                {
                    Some(status) => break status,
                    None => {
                        if last_beat.elapsed() >= interval {
                            info!("{} is still running", tool);
                            last_beat = Instant::now();
                        }
                        std::thread::sleep(POLL_INTERVAL.min(interval));
                    }
                }
            }
        }
    };

    debug!("{} exited with {}", tool, status);
    Ok(status)
}

/// Run `command` and map a non-zero exit status to [`Error::ProcessFailure`].
pub fn check(tool: &str, command: &mut Command, heartbeat: Option<Duration>) -> Result<()> {
    let status = call(tool, command, heartbeat)?;
    if !status.success() {
        return Err(Error::ProcessFailure {
            tool: tool.to_string(),
            status,
        });
    }
    Ok(())
}
