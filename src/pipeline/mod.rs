//! The four-stage packaging pipeline.
//!
//! Steps run strictly in `initialize -> cook -> stage -> package` order,
//! restricted to the caller's selection; a step whose name was not
//! selected is never entered. The first failing step aborts the run and
//! is reported as [`Error::Step`] ("Cook failed", ...); there are no
//! retries and no backward transitions.

pub mod cook;
pub mod initialize;
pub mod package;
pub mod stage;

use crate::config::{PipelineConfig, Step};
use crate::error::{Error, Result};
use crate::paths::PathSet;
use tracing::{debug, info};

/// One configured pipeline run.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    paths: PathSet,
}

impl Pipeline {
    /// Validate the configuration and derive the run's path set.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let paths = PathSet::resolve(&config);
        Ok(Pipeline { config, paths })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn paths(&self) -> &PathSet {
        &self.paths
    }

    /// Run the selected steps in fixed order, stopping at the first
    /// failure.
    pub fn run(&self) -> Result<()> {
        for step in Step::ALL {
            if !self.config.step_selected(step) {
                debug!("skipping {} step", step);
                continue;
            }
            info!(
                "running {} step for {} ({})",
                step, self.config.game, self.config.platform
            );
            let outcome = match step {
                Step::Initialize => initialize::run(&self.config, &self.paths),
                Step::Cook => cook::run(&self.config, &self.paths),
                Step::Stage => stage::run(&self.config, &self.paths),
                Step::Package => package::run(&self.config, &self.paths),
            };
            outcome.map_err(|source| Error::Step {
                step,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigurationList, Step};
    use crate::platform::Platform;
    use crate::testutil::{fake_tool, test_config};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn initialize_failure_prevents_cook_from_running() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        // The cook stub would leave a marker behind if it ever ran.
        fake_tool(
            &root.join("Engine/Binaries/Win64/UE4Editor-Cmd.exe"),
            "touch cook-ran",
        );

        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Initialize, Step::Cook];
        // Target override names a config tree that does not exist.
        config.target = Some("Test".into());

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert_eq!(err.failed_step(), Some(Step::Initialize));
        assert_eq!(err.to_string(), "Initialize failed");
        assert!(!root.join("cook-ran").exists());
    }

    #[test]
    fn initialize_copies_target_config_tree_and_runs_preship_hook() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("ExampleGame/Config.Demo/Sub")).unwrap();
        fs::write(root.join("ExampleGame/Config.Demo/Engine.ini"), "a=1\n").unwrap();
        fs::write(root.join("ExampleGame/Config.Demo/Sub/Game.ini"), "b=2\n").unwrap();
        let hook = root.join("hooks/preship.sh");
        fake_tool(&hook, "echo \"$RELPACK_GAME:$RELPACK_PLATFORM\" > preship-ran");

        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Initialize];
        config.target = Some("Demo".into());
        config.preship_hook = Some(hook);

        Pipeline::new(config).unwrap().run().unwrap();

        assert_eq!(
            fs::read_to_string(root.join("ExampleGame/Config/Engine.ini")).unwrap(),
            "a=1\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("ExampleGame/Config/Sub/Game.ini")).unwrap(),
            "b=2\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("preship-ran")).unwrap().trim(),
            "ExampleGame:Win64"
        );
    }

    #[test]
    fn preship_hook_failure_fails_initialize() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let hook = root.join("hooks/preship.sh");
        fake_tool(&hook, "exit 1");

        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Initialize];
        config.preship_hook = Some(hook);

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert_eq!(err.to_string(), "Initialize failed");
    }

    #[test]
    fn steps_run_in_fixed_order_regardless_of_selection_order() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fake_tool(
            &root.join("Engine/Binaries/Win64/UE4Editor-Cmd.exe"),
            "echo cook >> order.log",
        );
        fake_tool(
            &root.join("Engine/Binaries/DotNET/AutomationTool.exe"),
            "echo stage >> order.log",
        );
        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Stage, Step::Cook];

        Pipeline::new(config).unwrap().run().unwrap();
        assert_eq!(
            fs::read_to_string(root.join("order.log")).unwrap(),
            "cook\nstage\n"
        );
    }

    #[test]
    fn cook_failure_reports_cook_failed() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fake_tool(
            &root.join("Engine/Binaries/Win64/UE4Editor-Cmd.exe"),
            "exit 42",
        );

        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Cook];

        let err = Pipeline::new(config).unwrap().run().unwrap_err();
        assert_eq!(err.to_string(), "Cook failed");
        assert_eq!(err.failed_step(), Some(Step::Cook));
    }

    #[test]
    fn unselected_steps_are_never_entered() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        // No engine tools exist; running cook or stage would fail to spawn.
        let mut config = test_config(root, Platform::Win64, "Shipping");
        config.steps = vec![Step::Initialize];

        Pipeline::new(config).unwrap().run().unwrap();
    }

    #[test]
    fn invalid_configuration_is_rejected_at_construction() {
        let temp = TempDir::new().unwrap();
        let mut config = test_config(temp.path(), Platform::XboxOne, "Shipping");
        config.steps = vec![Step::Package];
        config.xdk_root = None;

        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn configuration_list_survives_into_pipeline() {
        let temp = TempDir::new().unwrap();
        let config = test_config(temp.path(), Platform::Win64, "Debug+Shipping");
        let pipeline = Pipeline::new(config).unwrap();
        assert_eq!(
            pipeline.config().configurations,
            ConfigurationList::parse("Debug+Shipping").unwrap()
        );
    }
}
