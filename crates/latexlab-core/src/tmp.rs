//! Process-scoped temporary directory
//!
//! The directory path is later spliced unescaped into shell-invoked tool
//! arguments (`%TMPDIR%`), so a base path that cannot survive shell quoting is
//! rejected outright instead of being escaped.

use crate::error::{LatexlabError, Result};
use crate::path;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables consulted for the base temp path, in order
pub const TEMP_ENV_VARS: [&str; 3] = ["TMPDIR", "TMP", "TEMP"];

const TMP_DIR_PREFIX: &str = "latexlab-";

/// Base temp path: the first non-empty variable of [`TEMP_ENV_VARS`],
/// else the platform default
pub fn temp_base(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    TEMP_ENV_VARS
        .iter()
        .find_map(|var| lookup(var).filter(|value| !value.is_empty()))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
}

/// Reject base paths that would break shell quoting
pub fn validate_temp_base(base: &Path) -> Result<()> {
    let text = base.to_string_lossy();

    if text.contains('\'') || text.contains('"') {
        return Err(LatexlabError::Configuration(format!(
            "temporary directory path contains a quote: {}",
            text
        )));
    }

    // A slash inside a non-absolute base means the variable holds something
    // other than a directory path.
    if text.contains('/') && !path::has_absolute_or_rooted_component(base) {
        return Err(LatexlabError::Configuration(format!(
            "temporary directory path contains a forbidden '/': {}",
            text
        )));
    }

    Ok(())
}

/// Create a fresh, uniquely named directory under `base`
pub fn create_tmp_dir_in(base: &Path) -> Result<TempDir> {
    validate_temp_base(base)?;

    let dir = tempfile::Builder::new()
        .prefix(TMP_DIR_PREFIX)
        .tempdir_in(base)
        .map_err(|e| {
            LatexlabError::Configuration(format!(
                "cannot create temporary directory under {}: {}",
                base.display(),
                e
            ))
        })?;

    tracing::debug!("Created temporary directory {}", dir.path().display());
    Ok(dir)
}

/// Create a fresh temporary directory under the base read from the environment
///
/// The directory is removed when the returned [`TempDir`] is dropped.
pub fn create_tmp_dir() -> Result<TempDir> {
    let base = temp_base(|var| std::env::var(var).ok());
    create_tmp_dir_in(&base)
}
