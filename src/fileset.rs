//! Declarative source→destination file-set copying.
//!
//! A [`FileSetMapping`] is an ordered collection of rules, each pairing a
//! source directory with a destination and a set of include/exclude glob
//! patterns. Describing a mapping is separate from applying it: `resolve`
//! only lists the (source file, destination file) pairs and never mutates
//! the mapping; `copy` applies every pair and reports aggregate success.
//!
//! The initialize step uses this to overlay a target-specific config tree,
//! and desktop packaging uses it to mirror the staged tree into the
//! package directory.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One source→destination rule.
#[derive(Debug, Clone)]
pub struct FileSetRule {
    /// Source directory, resolved against the mapping root when relative.
    source: PathBuf,
    /// Destination directory receiving the matched files.
    destination: PathBuf,
    /// Include patterns relative to the source directory. Empty means
    /// include everything.
    include: Vec<String>,
    /// Exclude patterns; matches are dropped after inclusion.
    exclude: Vec<String>,
}

impl FileSetRule {
    /// Set the destination directory for this rule.
    pub fn to(&mut self, destination: impl Into<PathBuf>) -> &mut Self {
        self.destination = destination.into();
        self
    }

    /// Add an include pattern (e.g. `**`).
    pub fn glob(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.include.push(pattern.into());
        self
    }

    /// Add an exclude pattern.
    pub fn exclude(&mut self, pattern: impl Into<String>) -> &mut Self {
        self.exclude.push(pattern.into());
        self
    }
}

/// An ordered set of copy rules rooted at a base directory.
#[derive(Debug, Clone)]
pub struct FileSetMapping {
    root: PathBuf,
    rules: Vec<FileSetRule>,
}

impl FileSetMapping {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FileSetMapping {
            root: root.into(),
            rules: Vec::new(),
        }
    }

    /// Start a new rule for `source` and return it for fluent completion:
    /// `mapping.map("Game/Config.Test").to(dest).glob("**")`.
    pub fn map(&mut self, source: impl Into<PathBuf>) -> &mut FileSetRule {
        self.rules.push(FileSetRule {
            source: source.into(),
            destination: PathBuf::new(),
            include: Vec::new(),
            exclude: Vec::new(),
        });
        self.rules.last_mut().expect("rule was just pushed")
    }

    /// List every (source file, destination file) pair the rules describe,
    /// in rule order and deterministic file order within a rule.
    ///
    /// A rule whose source directory does not exist is an error; a rule
    /// that matches no files is not.
    pub fn resolve(&self) -> Result<Vec<(PathBuf, PathBuf)>> {
        let mut pairs = Vec::new();
        for rule in &self.rules {
            let source_root = if rule.source.is_absolute() {
                rule.source.clone()
            } else {
                self.root.join(&rule.source)
            };
            if !source_root.is_dir() {
                return Err(Error::io(
                    "walking",
                    source_root,
                    std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "source directory does not exist",
                    ),
                ));
            }

            let include = build_globset(&rule.include, &["**"])?;
            let exclude = build_globset(&rule.exclude, &[])?;

            for entry in WalkDir::new(&source_root).sort_by_file_name() {
                let entry = entry.map_err(|err| {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| source_root.clone());
                    Error::io("walking", path, err.into())
                })?;
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = entry
                    .path()
                    .strip_prefix(&source_root)
                    .expect("walked entries live under the walk root");
                if !include.is_match(relative) || exclude.is_match(relative) {
                    continue;
                }
                pairs.push((entry.path().to_path_buf(), rule.destination.join(relative)));
            }
        }
        Ok(pairs)
    }

    /// Apply the mapping: copy every resolved pair, creating destination
    /// directories as needed.
    ///
    /// Every file is attempted even after a failure; per-file failures are
    /// logged and the aggregate is reported as [`Error::BulkCopy`].
    pub fn copy(&self) -> Result<()> {
        let pairs = self.resolve()?;
        let total = pairs.len();
        let mut failed = 0usize;

        for (source, destination) in &pairs {
            debug!("{} => {}", source.display(), destination.display());
            if let Err(err) = copy_one(source, destination) {
                warn!(
                    "failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    err
                );
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(Error::BulkCopy { failed, total });
        }
        Ok(())
    }
}

fn copy_one(source: &Path, destination: &Path) -> std::io::Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, destination)?;
    Ok(())
}

fn build_globset(patterns: &[String], defaults: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    if patterns.is_empty() {
        for pattern in defaults {
            builder.add(glob(pattern)?);
        }
    } else {
        for pattern in patterns {
            builder.add(glob(pattern)?);
        }
    }
    builder
        .build()
        .map_err(|err| Error::Config(format!("invalid glob set: {}", err)))
}

fn glob(pattern: &str) -> Result<Glob> {
    Glob::new(pattern).map_err(|err| Error::Config(format!("invalid glob '{}': {}", pattern, err)))
}
