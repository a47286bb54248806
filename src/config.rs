//! Per-run pipeline configuration.
//!
//! A [`PipelineConfig`] is built once per invocation (by the CLI) and never
//! mutated afterwards. SDK roots are plain fields here instead of being
//! read from the environment deep inside the packaging code; the only
//! place that touches `std::env` for them is the binary.

use crate::error::{Error, Result};
use crate::platform::{Family, Platform};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The configuration name that gets release-tier treatment: debug-only
/// sections are stripped from transformed files staged for it.
pub const SHIPPING_CONFIGURATION: &str = "Shipping";

/// One of the four pipeline steps, always visited in [`Step::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Initialize,
    Cook,
    Stage,
    Package,
}

impl Step {
    /// Fixed execution order; the caller's selection only filters it.
    pub const ALL: [Step; 4] = [Step::Initialize, Step::Cook, Step::Stage, Step::Package];

    pub fn name(&self) -> &'static str {
        match self {
            Step::Initialize => "Initialize",
            Step::Cook => "Cook",
            Step::Stage => "Stage",
            Step::Package => "Package",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Step::ALL
            .iter()
            .copied()
            .find(|step| step.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Config(format!(
                    "unknown step '{}'; expected one of: initialize, cook, stage, package",
                    s
                ))
            })
    }
}

/// A `+`-joined build configuration string decomposed into its ordered
/// atomic names, e.g. `"Debug+Shipping"` -> `["Debug", "Shipping"]`.
///
/// Console staging and packaging loops process each atomic name exactly
/// once, in order, producing one artifact per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationList {
    names: Vec<String>,
}

impl ConfigurationList {
    pub fn parse(joined: &str) -> Result<Self> {
        let names: Vec<String> = joined
            .split('+')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect();
        if names.is_empty() {
            return Err(Error::Config(format!(
                "configuration '{}' contains no configuration names",
                joined
            )));
        }
        Ok(ConfigurationList { names })
    }

    /// Atomic configuration names, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The `+`-joined form passed to `-ClientConfig=`.
    pub fn joined(&self) -> String {
        self.names.join("+")
    }
}

impl fmt::Display for ConfigurationList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Immutable per-run configuration for the packaging pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Game/project identifier; names the project directory under the root.
    pub game: String,
    pub platform: Platform,
    pub configurations: ConfigurationList,
    /// Steps to run, any subset of the four. Execution order is always
    /// [`Step::ALL`] order regardless of how the selection was given.
    pub steps: Vec<Step>,
    /// Workspace root containing `Engine/` and the project directory.
    pub root_dir: PathBuf,
    /// Target configuration override applied during initialize
    /// (`<game>/Config.<target>` copied over `<game>/Config`).
    pub target: Option<String>,
    /// Console layout file staged once per atomic configuration.
    pub layout: Option<PathBuf>,
    /// Base release version when building a patch.
    pub patch_base: Option<String>,
    /// Add platform-certification flags for store submission.
    pub final_submission: bool,
    /// Enable iterative cooking.
    pub iterate: bool,
    /// Enable pak file compression.
    pub compress: bool,
    /// Optional pre-ship hook executable, run during initialize.
    pub preship_hook: Option<PathBuf>,
    /// Durango XDK root; required for XboxOne staging and packaging.
    pub xdk_root: Option<PathBuf>,
    /// SCE SDK root; required for PS4 packaging.
    pub sce_root: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn step_selected(&self, step: Step) -> bool {
        self.steps.contains(&step)
    }

    /// Fail fast on requirements the selected steps cannot meet, instead
    /// of erroring deep inside a packaging loop.
    pub fn validate(&self) -> Result<()> {
        if self.game.is_empty() {
            return Err(Error::Config("game name must not be empty".into()));
        }
        if self.configurations.is_empty() {
            return Err(Error::Config("no build configuration given".into()));
        }
        match self.platform.family() {
            Family::XboxOne => {
                let needs_xdk =
                    self.step_selected(Step::Stage) || self.step_selected(Step::Package);
                if needs_xdk && self.xdk_root.is_none() {
                    return Err(Error::Config(
                        "XboxOne staging and packaging require the Durango XDK root \
                         (DurangoXDK environment variable)"
                            .into(),
                    ));
                }
            }
            Family::Ps4 => {
                if self.step_selected(Step::Package) && self.sce_root.is_none() {
                    return Err(Error::Config(
                        "PS4 packaging requires the SCE SDK root \
                         (SCE_ROOT_DIR environment variable)"
                            .into(),
                    ));
                }
            }
            Family::Desktop => {}
        }
        Ok(())
    }

    pub(crate) fn required_xdk_root(&self) -> Result<&Path> {
        self.xdk_root
            .as_deref()
            .ok_or_else(|| Error::Config("Durango XDK root is not set".into()))
    }

    pub(crate) fn required_sce_root(&self) -> Result<&Path> {
        self.sce_root
            .as_deref()
            .ok_or_else(|| Error::Config("SCE SDK root is not set".into()))
    }
}
