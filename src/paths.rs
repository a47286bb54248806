//! Derived, read-only path set for one pipeline run.
//!
//! Everything here is computed deterministically from [`PipelineConfig`];
//! nothing is cached across runs. The staged/package directories use the
//! platform's staged token (`WindowsNoEditor` for Win64 client builds).

use crate::config::PipelineConfig;
use std::path::{Path, PathBuf};

/// Directories and tool locations derived from the pipeline configuration.
#[derive(Debug, Clone)]
pub struct PathSet {
    /// `<root>/Engine`
    pub engine_dir: PathBuf,
    /// `<root>/<game>`
    pub project_dir: PathBuf,
    /// `<project>/Saved/StagedBuilds/<staged platform>`
    pub stage_dir: PathBuf,
    /// `<project>/Saved/Packages/<staged platform>`
    pub package_dir: PathBuf,
}

impl PathSet {
    pub fn resolve(config: &PipelineConfig) -> Self {
        let engine_dir = config.root_dir.join("Engine");
        let project_dir = config.root_dir.join(&config.game);
        let staged = config.platform.staged_name();
        let stage_dir = project_dir.join("Saved/StagedBuilds").join(staged);
        let package_dir = project_dir.join("Saved/Packages").join(staged);
        PathSet {
            engine_dir,
            project_dir,
            stage_dir,
            package_dir,
        }
    }

    /// Commandlet host used for cooking.
    pub fn editor_cmd(&self) -> PathBuf {
        self.engine_dir.join("Binaries/Win64/UE4Editor-Cmd.exe")
    }

    /// Automation tool driving BuildCookRun.
    pub fn automation_tool(&self) -> PathBuf {
        self.engine_dir.join("Binaries/DotNET/AutomationTool.exe")
    }

    /// XboxOne packaging tool under the Durango XDK root.
    pub fn makepkg(xdk_root: &Path) -> PathBuf {
        xdk_root.join("bin/MakePkg.exe")
    }

    /// PS4 publishing tool under the SCE SDK root.
    pub fn orbis_pub_cmd(sce_root: &Path) -> PathBuf {
        sce_root.join("ORBIS/Tools/Publishing Tools/bin/orbis-pub-cmd.exe")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigurationList, Step};
    use crate::platform::Platform;

    fn config_for(platform: Platform) -> PipelineConfig {
        PipelineConfig {
            game: "ExampleGame".into(),
            platform,
            configurations: ConfigurationList::parse("Shipping").unwrap(),
            steps: Step::ALL.to_vec(),
            root_dir: PathBuf::from("/work"),
            target: None,
            layout: None,
            patch_base: None,
            final_submission: false,
            iterate: false,
            compress: false,
            preship_hook: None,
            xdk_root: None,
            sce_root: None,
        }
    }

    #[test]
    fn win64_paths_use_windows_no_editor() {
        let paths = PathSet::resolve(&config_for(Platform::Win64));
        assert_eq!(
            paths.stage_dir,
            PathBuf::from("/work/ExampleGame/Saved/StagedBuilds/WindowsNoEditor")
        );
        assert_eq!(
            paths.package_dir,
            PathBuf::from("/work/ExampleGame/Saved/Packages/WindowsNoEditor")
        );
    }

    #[test]
    fn console_paths_use_platform_name() {
        let paths = PathSet::resolve(&config_for(Platform::Ps4));
        assert_eq!(
            paths.stage_dir,
            PathBuf::from("/work/ExampleGame/Saved/StagedBuilds/PS4")
        );
    }

    #[test]
    fn tool_locations() {
        let paths = PathSet::resolve(&config_for(Platform::Win64));
        assert!(paths.editor_cmd().ends_with("Binaries/Win64/UE4Editor-Cmd.exe"));
        assert!(paths
            .automation_tool()
            .ends_with("Binaries/DotNET/AutomationTool.exe"));
        assert_eq!(
            PathSet::makepkg(Path::new("/xdk")),
            PathBuf::from("/xdk/bin/MakePkg.exe")
        );
        assert!(PathSet::orbis_pub_cmd(Path::new("/sce"))
            .ends_with("ORBIS/Tools/Publishing Tools/bin/orbis-pub-cmd.exe"));
    }
}
