//! Cook step: platform content compilation through the editor commandlet.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::paths::PathSet;
use crate::process;
use std::process::Command;
use std::time::Duration;

/// Shader compilation and cook verification can block silently for tens of
/// minutes; the heartbeat keeps build-farm watchdogs from killing the run.
const COOK_HEARTBEAT: Duration = Duration::from_secs(60);

pub(crate) fn run(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    let mut command = Command::new(paths.editor_cmd());
    command
        .arg(&config.game)
        .arg("-Run=Cook")
        .arg(format!(
            "-TargetPlatform={}",
            config.platform.staged_name()
        ))
        .args(["-BuildMachine", "-Unattended", "-StdOut", "-UTF8Output"])
        .current_dir(&config.root_dir);
    if config.iterate {
        command.args(["-Iterate", "-IterateHash"]);
    }

    process::check("UE4Editor-Cmd", &mut command, Some(COOK_HEARTBEAT))
}
