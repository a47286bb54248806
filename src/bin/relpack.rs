use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use relpack::{
    preflight, ConfigurationList, Pipeline, PipelineConfig, Platform, Step,
};
use tracing::error;
use tracing_subscriber::EnvFilter;

/// Package an Unreal project for release.
#[derive(Debug, Parser)]
#[command(name = "relpack", version, about)]
struct Args {
    /// Game/project name (the project directory under the root)
    #[arg(long)]
    game: String,

    /// Target platform (Win32, Win64, Mac, Linux, XboxOne, PS4)
    #[arg(long, value_parser = Platform::from_str)]
    platform: Platform,

    /// Build configuration, '+'-joined for multiple (e.g. Debug+Shipping)
    #[arg(long)]
    configuration: String,

    /// Workspace root containing Engine/ and the project directory
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Only run the given steps instead of all of them
    #[arg(long, value_parser = Step::from_str, value_delimiter = ',',
          default_values = ["initialize", "cook", "stage", "package"])]
    steps: Vec<Step>,

    /// Target configuration to copy over the project config tree
    #[arg(long)]
    target: Option<String>,

    /// Layout file to use for the package (consoles)
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Create a patch based on the given release version
    #[arg(long, value_name = "version")]
    patch: Option<String>,

    /// Enable package options for final submission
    #[arg(long = "final")]
    final_submission: bool,

    /// Enable iterative cooking
    #[arg(long)]
    iterate: bool,

    /// Enable pak file compression
    #[arg(long)]
    compress: bool,

    /// Executable to run as the pre-ship hook during initialize
    #[arg(long)]
    preship_hook: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = PipelineConfig {
        game: args.game,
        platform: args.platform,
        configurations: ConfigurationList::parse(&args.configuration)?,
        steps: args.steps,
        root_dir: args.root,
        target: args.target,
        layout: args.layout,
        patch_base: args.patch,
        final_submission: args.final_submission,
        iterate: args.iterate,
        compress: args.compress,
        preship_hook: args.preship_hook,
        // SDK roots come from the environment here and nowhere else;
        // everything downstream takes them from the config.
        xdk_root: std::env::var_os("DurangoXDK").map(PathBuf::from),
        sce_root: std::env::var_os("SCE_ROOT_DIR").map(PathBuf::from),
    };

    let pipeline = Pipeline::new(config).context("building the packaging pipeline")?;
    preflight::check_tools(pipeline.config(), pipeline.paths())?;

    if let Err(err) = pipeline.run() {
        error!("{:#}", anyhow::Error::from(err));
        std::process::exit(1);
    }
    Ok(())
}
