//! Initialize step: target configuration overlay and pre-ship hook.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::fileset::FileSetMapping;
use crate::paths::PathSet;
use crate::process;
use std::process::Command;

pub(crate) fn run(config: &PipelineConfig, paths: &PathSet) -> Result<()> {
    if let Some(target) = &config.target {
        let mut mapping = FileSetMapping::new(&config.root_dir);
        mapping
            .map(format!("{}/Config.{}", config.game, target))
            .to(paths.project_dir.join("Config"))
            .glob("**");
        mapping.copy()?;
    }

    if let Some(hook) = &config.preship_hook {
        let mut command = Command::new(hook);
        command
            .current_dir(&config.root_dir)
            .env("RELPACK_GAME", &config.game)
            .env("RELPACK_PLATFORM", config.platform.name())
            .env("RELPACK_CONFIGURATION", config.configurations.joined());
        process::check("preship hook", &mut command, None)?;
    }

    Ok(())
}
