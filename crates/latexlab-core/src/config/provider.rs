//! Configuration sources
//!
//! Resolvers take a fresh [`Config`] snapshot on every call, so a provider
//! must be cheap to query and must not cache results on the caller's behalf.

use super::model::Config;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Source of configuration snapshots
pub trait ConfigProvider: Send + Sync {
    fn snapshot(&self) -> Config;
}

impl ConfigProvider for Config {
    fn snapshot(&self) -> Config {
        self.clone()
    }
}

/// latexlab.toml on disk, re-read on every snapshot
///
/// A missing file yields the defaults. A file that fails to parse also yields
/// the defaults, with a warning, so that a half-edited config never breaks
/// path resolution.
#[derive(Debug, Clone)]
pub struct FileConfig {
    path: PathBuf,
}

impl FileConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigProvider for FileConfig {
    fn snapshot(&self) -> Config {
        if !self.path.exists() {
            return Config::default();
        }
        Config::from_file(&self.path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring {}: {}", self.path.display(), e);
            Config::default()
        })
    }
}

/// In-memory configuration that can be changed while a session is open
#[derive(Debug, Default)]
pub struct SharedConfig {
    inner: RwLock<Config>,
}

impl SharedConfig {
    pub fn new(config: Config) -> Self {
        Self {
            inner: RwLock::new(config),
        }
    }

    /// Apply `f` to the stored configuration
    pub fn update(&self, f: impl FnOnce(&mut Config)) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

impl ConfigProvider for SharedConfig {
    fn snapshot(&self) -> Config {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}
