//! Staged release packaging pipeline for Unreal Engine game builds.
//!
//! relpack drives the four-step release sequence (initialize, cook,
//! stage, package) with one repeatable command across desktop and
//! console targets, including incremental patch releases and a
//! final-submission mode.
//!
//! # Architecture
//!
//! ```text
//! Pipeline (orchestrator, fixed step order, abort on first failure)
//!     │
//!     ├── initialize: FileSetMapping (config overlay) + pre-ship hook
//!     ├── cook:       process runner (editor commandlet, heartbeat)
//!     ├── stage:      process runner + staging fix-ups per Family
//!     └── package:    Family strategy (desktop mirror / MakePkg / orbis)
//!                         └── uses ini reader + process runner
//! ```
//!
//! Platform dispatch is a closed set: [`platform::Platform`] maps to a
//! [`platform::Family`] that owns the staging fix-ups and the package
//! assembly for its platforms. Unknown platform identifiers are rejected
//! when the configuration is built, never silently skipped.

pub mod config;
pub mod error;
pub mod fileset;
pub mod ini;
pub mod paths;
pub mod pipeline;
pub mod platform;
pub mod preflight;
pub mod process;
pub mod staging;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{ConfigurationList, PipelineConfig, Step, SHIPPING_CONFIGURATION};
pub use error::{Error, Result};
pub use paths::PathSet;
pub use pipeline::Pipeline;
pub use platform::{Family, Platform};
