//! Preflight checks for the tools a run will invoke.
//!
//! Validates that the engine binaries and console SDK tools the selected
//! steps need actually exist before any step runs. This prevents cryptic
//! mid-pipeline spawn errors after minutes of cooking.

use crate::config::{PipelineConfig, Step};
use crate::error::{Error, Result};
use crate::paths::PathSet;
use crate::platform::Family;
use std::path::PathBuf;

/// Check that every tool the selected steps will invoke exists on disk.
///
/// All missing tools are reported in a single error.
pub fn check_tools(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    let mut required: Vec<(&str, PathBuf)> = Vec::new();

    if config.step_selected(Step::Cook) {
        required.push(("editor commandlet host", paths.editor_cmd()));
    }
    if config.step_selected(Step::Stage) {
        required.push(("automation tool", paths.automation_tool()));
    }
    match config.platform.family() {
        Family::XboxOne => {
            if config.step_selected(Step::Stage) || config.step_selected(Step::Package) {
                required.push(("MakePkg", PathSet::makepkg(config.required_xdk_root()?)));
            }
        }
        Family::Ps4 => {
            if config.step_selected(Step::Package) {
                required.push((
                    "orbis-pub-cmd",
                    PathSet::orbis_pub_cmd(config.required_sce_root()?),
                ));
            }
        }
        Family::Desktop => {}
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|(_, path)| !path.is_file())
        .map(|(name, path)| format!("  {} ({})", name, path.display()))
        .collect();

    if !missing.is_empty() {
        return Err(Error::Config(format!(
            "missing required tools:\n{}",
            missing.join("\n")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Step;
    use crate::platform::Platform;
    use crate::testutil::{fake_tool, test_config};
    use tempfile::TempDir;

    #[test]
    fn reports_every_missing_tool_at_once() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config(temp.path(), Platform::XboxOne, "Shipping");
        config.steps = vec![Step::Cook, Step::Stage, Step::Package];
        let paths = PathSet::resolve(&config);

        let err = check_tools(&config, &paths).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("editor commandlet host"));
        assert!(message.contains("automation tool"));
        assert!(message.contains("MakePkg"));
    }

    #[test]
    fn passes_when_selected_tools_exist() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fake_tool(&root.join("Engine/Binaries/Win64/UE4Editor-Cmd.exe"), "exit 0");
        fake_tool(
            &root.join("Engine/Binaries/DotNET/AutomationTool.exe"),
            "exit 0",
        );

        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Cook, Step::Stage, Step::Package];
        let paths = PathSet::resolve(&config);

        check_tools(&config, &paths).unwrap();
    }

    #[test]
    fn unselected_steps_require_no_tools() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config(temp.path(), Platform::Ps4, "Shipping");
        config.steps = vec![Step::Initialize];
        let paths = PathSet::resolve(&config);

        check_tools(&config, &paths).unwrap();
    }
}
