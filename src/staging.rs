//! Single-file staging: plain copies and configuration-aware text
//! transforms.
//!
//! Transformed files (console layouts, the XboxOne application manifest)
//! carry a `{configuration}` token and may carry debug-only sections
//! delimited by `<!-- #if Debug -->` / `<!-- #endif Debug -->`. Staging
//! for the Shipping tier strips every such span, markers included.

use crate::config::SHIPPING_CONFIGURATION;
use crate::error::{Error, Result};
use crate::platform::Platform;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::info;

const CONFIGURATION_TOKEN: &str = "{configuration}";
const DEBUG_SECTION_PATTERN: &str = r"(?s)<!-- #if Debug -->.*?<!-- #endif Debug -->";

/// Byte-for-byte copy of `source` to `destination`, overwriting.
pub fn copy_file(source: &Path, destination: &Path) -> Result<()> {
    info!("staging {} to {}", source.display(), destination.display());
    fs::copy(source, destination)
        .map_err(|source_err| Error::io("copying", source, source_err))?;
    Ok(())
}

/// Stage `source` to `destination` as text, substituting the
/// `{configuration}` token with the active configuration name.
///
/// PS4 tooling expects lower-case configuration tokens in layout files,
/// so the substituted name is lower-cased on that platform. When the
/// configuration is the Shipping tier, every debug-only span is removed
/// (non-greedy, may span lines, all occurrences).
pub fn stage_transformed(
    source: &Path,
    destination: &Path,
    platform: Platform,
    configuration: &str,
) -> Result<()> {
    info!("staging {} to {}", source.display(), destination.display());

    let content =
        fs::read_to_string(source).map_err(|source_err| Error::io("reading", source, source_err))?;

    let substituted = match platform {
        Platform::Ps4 => content.replace(CONFIGURATION_TOKEN, &configuration.to_lowercase()),
        _ => content.replace(CONFIGURATION_TOKEN, configuration),
    };

    let transformed = if configuration == SHIPPING_CONFIGURATION {
        let debug_sections =
            Regex::new(DEBUG_SECTION_PATTERN).expect("debug section pattern is valid");
        debug_sections.replace_all(&substituted, "").into_owned()
    } else {
        substituted
    };

    fs::write(destination, transformed)
        .map_err(|source_err| Error::io("writing", destination, source_err))?;
    Ok(())
}
