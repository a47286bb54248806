//! Package step: assemble the distributable package from the staged tree.
//!
//! The destination directory is destructively recreated first, so re-runs
//! never accumulate stale artifacts. Dispatch is per packaging family:
//! desktop platforms mirror the staged tree, XboxOne drives MakePkg once
//! per atomic configuration, PS4 drives orbis-pub-cmd once per atomic
//! configuration.

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::fileset::FileSetMapping;
use crate::ini;
use crate::paths::PathSet;
use crate::platform::Family;
use crate::process;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{info, warn};

pub(crate) fn run(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    if paths.package_dir.exists() {
        info!("removing {}", paths.package_dir.display());
        fs::remove_dir_all(&paths.package_dir)
            .map_err(|source| Error::io("removing", paths.package_dir.clone(), source))?;
    }
    fs::create_dir_all(&paths.package_dir)
        .map_err(|source| Error::io("creating", paths.package_dir.clone(), source))?;

    config.platform.family().package(config, paths)
}

impl Family {
    /// Assemble the final package artifacts from a fully staged tree.
    pub(crate) fn package(&self, config: &PipelineConfig, paths: &PathSet) -> Result<()> {
        match self {
            Family::Desktop => package_desktop(config, paths),
            Family::XboxOne => package_xbox_one(config, paths),
            Family::Ps4 => package_ps4(config, paths),
        }
    }
}

/// Desktop package: the staged tree, mirrored.
fn package_desktop(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    let staged_source = paths
        .stage_dir
        .strip_prefix(&config.root_dir)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| paths.stage_dir.clone());

    let mut mapping = FileSetMapping::new(&config.root_dir);
    mapping
        .map(staged_source)
        .to(&paths.package_dir)
        .glob("**");
    mapping.copy()
}

/// XboxOne package: one MakePkg invocation per atomic configuration.
///
/// MakePkg expects the per-configuration manifest files at the root of the
/// source tree, so they are copied up before the call and removed again
/// afterwards. Cleanup runs whether or not the tool succeeded; a failed
/// packaging attempt must not leave stray manifest copies in the staged
/// tree.
fn package_xbox_one(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    let makepkg = PathSet::makepkg(config.required_xdk_root()?);
    let game_os = paths.stage_dir.join("era.xvd");
    let ini_path = paths.project_dir.join("Config/XboxOne/XboxOneEngine.ini");
    let product_id = ini::get_ini_value(&ini_path, "ProductId")?;
    let content_id = ini::get_ini_value(&ini_path, "ContentId")?;

    for configuration in config.configurations.iter() {
        let destination = paths.package_dir.join(configuration);
        let layout_file = paths
            .stage_dir
            .join(format!("{}-{}.xml", config.game, configuration));

        let mut command = Command::new(&makepkg);
        command
            .args(["pack", "/v"])
            .arg("/gameos")
            .arg(&game_os)
            .arg("/f")
            .arg(&layout_file)
            .arg("/d")
            .arg(&paths.stage_dir)
            .arg("/pd")
            .arg(&destination)
            .arg("/productid")
            .arg(&product_id)
            .arg("/contentid")
            .arg(&content_id)
            .current_dir(&config.root_dir);
        if config.final_submission {
            command.arg("/l");
        }

        fs::create_dir(&destination)
            .map_err(|source| Error::io("creating", destination.clone(), source))?;

        let manifest_copies = copy_manifests_to_root(paths, configuration)?;
        let outcome = process::check("MakePkg pack", &mut command, None);
        for copy in &manifest_copies {
            if let Err(err) = fs::remove_file(copy) {
                warn!("failed to remove {}: {}", copy.display(), err);
            }
        }
        outcome?;
    }

    Ok(())
}

/// Copy every file from the per-configuration manifest directory up into
/// the stage root (flattening), returning the created copies.
fn copy_manifests_to_root(paths: &PathSet, configuration: &str) -> Result<Vec<PathBuf>> {
    let manifest_dir = paths.stage_dir.join("Manifests").join(configuration);
    let entries = fs::read_dir(&manifest_dir)
        .map_err(|source| Error::io("reading", manifest_dir.clone(), source))?;

    let mut copies = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::io("reading", manifest_dir.clone(), source))?;
        let target = paths.stage_dir.join(entry.file_name());
        fs::copy(entry.path(), &target)
            .map_err(|source| Error::io("copying", entry.path(), source))?;
        copies.push(target);
    }
    Ok(copies)
}

/// PS4 package: one orbis-pub-cmd image per atomic configuration, named
/// `<game>-<configuration>-<titleid>.pkg`.
fn package_ps4(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    let orbis_pub_cmd = PathSet::orbis_pub_cmd(config.required_sce_root()?);
    let temporary_dir = paths.project_dir.join("Saved/Temp");
    let ini_path = paths.project_dir.join("Config/PS4/PS4Engine.ini");
    let title_id = ini::get_ini_value(&ini_path, "TitleID")?;

    for configuration in config.configurations.iter() {
        let destination_file = paths
            .package_dir
            .join(format!("{}-{}-{}.pkg", config.game, configuration, title_id));
        let layout_file = paths
            .stage_dir
            .join(format!("{}-{}.gp4", config.game, configuration));

        let mut command = Command::new(&orbis_pub_cmd);
        command
            .arg("img_create")
            .arg("--no_progress_bar")
            .arg("--tmp_path")
            .arg(&temporary_dir)
            .arg(&layout_file)
            .arg(&destination_file)
            .current_dir(&config.root_dir);
        process::check("orbis-pub-cmd", &mut command, None)?;
    }

    Ok(())
}
