//! Stage step: BuildCookRun staging plus platform post-staging fix-ups.
//!
//! After the engine has staged cooked content, binaries and prerequisites,
//! consoles need manifest surgery before the tree is packageable: the
//! XboxOne auto-generated manifest is replaced by per-configuration
//! transformed copies, layout files are staged per atomic configuration,
//! and console binaries are renamed to the names the layout files refer
//! to.

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::paths::PathSet;
use crate::platform::Family;
use crate::process;
use crate::staging;
use std::fs;
use std::process::Command;

pub(crate) fn run(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    let mut command = Command::new(paths.automation_tool());
    command
        .args(["BuildCookRun", "-UE4exe=UE4Editor-Cmd.exe", "-UTF8Output"])
        .arg(format!("-Project={}", config.game))
        .arg(format!("-TargetPlatform={}", config.platform.name()))
        .arg(format!("-ClientConfig={}", config.configurations.joined()))
        .args([
            "-SkipCook",
            "-Stage",
            "-Pak",
            "-Prereqs",
            "-CrashReporter",
            "-NoDebugInfo",
        ])
        .current_dir(&config.root_dir);
    if config.compress {
        command.arg("-Compressed");
    }
    if let Some(patch) = &config.patch_base {
        command
            .arg("-GeneratePatch")
            .arg(format!("-BasedOnReleaseVersion={}", patch));
    }
    process::check("AutomationTool", &mut command, None)?;

    config.platform.family().stage_fixups(config, paths)?;

    if let Some(layout) = &config.layout {
        for configuration in config.configurations.iter() {
            let layout_file_name = format!(
                "{}-{}.{}",
                config.game,
                configuration,
                config.platform.layout_extension()
            );
            staging::stage_transformed(
                layout,
                &paths.stage_dir.join(layout_file_name),
                config.platform,
                configuration,
            )?;
        }
    }

    config.platform.family().rename_staged_binary(config, paths)?;

    // Copy the base release's pak next to the staged content so a patch
    // package is self-contained.
    if let Some(patch) = &config.patch_base {
        let pak_file_name = format!("{}-{}.pak", config.game, config.platform.staged_name());
        let release_pak = paths
            .project_dir
            .join("Releases")
            .join(patch)
            .join(config.platform.staged_name())
            .join(&pak_file_name);
        let staged_pak = paths
            .stage_dir
            .join(&config.game)
            .join("Content/Paks")
            .join(&pak_file_name);
        staging::copy_file(&release_pak, &staged_pak)?;
    }

    Ok(())
}

impl Family {
    /// Post-staging manifest fix-ups, before layout files are staged.
    pub(crate) fn stage_fixups(&self, config: &PipelineConfig, paths: &PathSet) -> Result<()> {
        match self {
            Family::XboxOne => {
                stage_xbox_manifests(config, paths)?;
                // Placeholder files for empty chunks required by the
                // package layout.
                for chunk in ["LaunchChunk.bin", "AlignmentChunk.bin"] {
                    let path = paths.stage_dir.join(chunk);
                    fs::write(&path, b"\0").map_err(|source| Error::io("writing", path, source))?;
                }
                Ok(())
            }
            Family::Desktop | Family::Ps4 => Ok(()),
        }
    }

    /// Homogenize the staged binary name for console packaging. A missing
    /// binary is not an error; some configurations produce none.
    pub(crate) fn rename_staged_binary(
        &self,
        config: &PipelineConfig,
        paths: &PathSet,
    ) -> Result<()> {
        let (binary_path, from_suffix, to_suffix) = match self {
            Family::Desktop => return Ok(()),
            Family::Ps4 => (
                // PS4 staging lower-cases the whole binary path.
                paths.stage_dir.join(
                    format!("{}/Binaries/PS4/{}", config.game, config.game).to_lowercase(),
                ),
                ".self",
                "-ps4-development.self",
            ),
            Family::XboxOne => (
                paths
                    .stage_dir
                    .join(format!("{}/Binaries/XboxOne/{}", config.game, config.game)),
                ".exe",
                "-XboxOne-Development.exe",
            ),
        };

        let source = with_suffix(&binary_path, from_suffix);
        if source.exists() {
            let destination = with_suffix(&binary_path, to_suffix);
            fs::rename(&source, &destination)
                .map_err(|err| Error::io("renaming", source, err))?;
        }
        Ok(())
    }
}

fn with_suffix(path: &std::path::Path, suffix: &str) -> std::path::PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    std::path::PathBuf::from(s)
}

/// Replace the staging tool's auto-generated manifest with one transformed
/// copy per atomic configuration, and build its appdata blob.
fn stage_xbox_manifests(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    for generated in ["AppxManifest.xml", "appdata.bin"] {
        let path = paths.stage_dir.join(generated);
        fs::remove_file(&path).map_err(|source| Error::io("removing", path, source))?;
    }

    let manifest_source = paths.project_dir.join("Config/XboxOne/AppxManifest.xml");
    let makepkg = PathSet::makepkg(config.required_xdk_root()?);

    for configuration in config.configurations.iter() {
        let manifest_dir = paths.stage_dir.join("Manifests").join(configuration);
        fs::create_dir_all(&manifest_dir)
            .map_err(|source| Error::io("creating", manifest_dir.clone(), source))?;
        let manifest = manifest_dir.join("AppxManifest.xml");
        staging::stage_transformed(&manifest_source, &manifest, config.platform, configuration)?;

        let mut command = Command::new(&makepkg);
        command
            .arg("appdata")
            .arg("/f")
            .arg(&manifest)
            .arg("/pd")
            .arg(&manifest_dir)
            .current_dir(&config.root_dir);
        process::check("MakePkg appdata", &mut command, None)?;
    }

    Ok(())
}
