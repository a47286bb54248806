//! Error taxonomy for the packaging pipeline.
//!
//! Every step-level failure is fatal to the pipeline; nothing is retried
//! automatically. The orchestrator wraps the first failing step in
//! [`Error::Step`] so the user-visible message names the step that failed
//! ("Cook failed", "Package failed", ...).

use crate::config::Step;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid pipeline configuration: unknown platform,
    /// absent SDK root, empty configuration list.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required `key=value` line was absent from an engine ini file.
    #[error("key '{key}' was not found in {}", path.display())]
    KeyNotFound { key: String, path: PathBuf },

    /// An external tool ran to completion but reported failure.
    #[error("'{tool}' failed with {status}")]
    ProcessFailure { tool: String, status: ExitStatus },

    /// A filesystem operation failed.
    #[error("{op} '{}'", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An aggregate file-set copy reported one or more per-file failures.
    /// Individual failures are logged as they happen.
    #[error("bulk copy failed for {failed} of {total} files")]
    BulkCopy { failed: usize, total: usize },

    /// A pipeline step failed; no later step runs.
    #[error("{step} failed")]
    Step {
        step: Step,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// The step this error aborted, if it was wrapped by the orchestrator.
    pub fn failed_step(&self) -> Option<Step> {
        match self {
            Error::Step { step, .. } => Some(*step),
            _ => None,
        }
    }
}
