//! Minimal reader for flat `key=value` engine ini files.
//!
//! Console packaging needs a handful of identifiers (ProductId, ContentId,
//! TitleID) out of platform engine ini files. The match is a single-line
//! regex anchored at line start, case-sensitive, and the value is the raw
//! trailing text. The file is re-read on every call; identifiers are only
//! needed once per package invocation.

use crate::error::{Error, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Look up `key=value` in `path` and return the value.
///
/// Fails with [`Error::KeyNotFound`] when no line matches, and with
/// [`Error::Io`] when the file cannot be read.
pub fn get_ini_value(path: &Path, key: &str) -> Result<String> {
    let content =
        fs::read_to_string(path).map_err(|source| Error::io("reading", path, source))?;
    let pattern = Regex::new(&format!("(?m)^{}=(.*)$", regex::escape(key)))
        .expect("escaped key always forms a valid pattern");
    match pattern.captures(&content) {
        Some(captures) => Ok(captures[1].to_string()),
        None => Err(Error::KeyNotFound {
            key: key.to_string(),
            path: path.to_path_buf(),
        }),
    }
}
