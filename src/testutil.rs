//! Shared helpers for tests that drive the pipeline against temp trees.
//!
//! External tools (editor, automation tool, console SDKs) are faked as
//! executable shell stubs so the pipeline's process handling can be
//! exercised without any engine installed.

use crate::config::{ConfigurationList, PipelineConfig, Step};
use crate::platform::Platform;
use std::fs;
use std::path::Path;

/// Write an executable `#!/bin/sh` stub at `path`, creating parents.
pub(crate) fn fake_tool(path: &Path, script: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

/// A config for `ExampleGame` rooted at `root`, with all steps selected
/// and SDK roots pointing at `<root>/xdk` and `<root>/sce`.
pub(crate) fn test_config(
    root: impl AsRef<Path>,
    platform: Platform,
    configurations: &str,
) -> PipelineConfig {
    let root = root.as_ref().to_path_buf();
    PipelineConfig {
        game: "ExampleGame".into(),
        platform,
        configurations: ConfigurationList::parse(configurations).unwrap(),
        steps: Step::ALL.to_vec(),
        target: None,
        layout: None,
        patch_base: None,
        final_submission: false,
        iterate: false,
        compress: false,
        preship_hook: None,
        xdk_root: Some(root.join("xdk")),
        sce_root: Some(root.join("sce")),
        root_dir: root,
    }
}
