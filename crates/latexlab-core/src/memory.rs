//! Directories reported by the most recent build of each root
//!
//! The build orchestrator replaces a root's record wholesale after every run,
//! so readers always observe one complete sequence. Lookups scan from the
//! newest step to the oldest and take the first step carrying the requested
//! directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Directories one compiler invocation wrote to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxdir: Option<String>,
}

impl BuildStep {
    pub fn new(outdir: Option<&str>, auxdir: Option<&str>) -> Self {
        Self {
            outdir: outdir.map(str::to_string),
            auxdir: auxdir.map(str::to_string),
        }
    }
}

/// Per-root build-step memory
#[derive(Debug, Default)]
pub struct BuildMemory {
    steps: RwLock<BTreeMap<PathBuf, Arc<[BuildStep]>>>,
}

impl BuildMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the steps recorded for `root`
    pub fn record(&self, root: &Path, steps: Vec<BuildStep>) {
        tracing::debug!("Recording {} build step(s) for {}", steps.len(), root.display());
        self.write().insert(root.to_path_buf(), Arc::from(steps));
    }

    /// Record a single step for `root`
    pub fn set_tex_dirs(&self, root: &Path, outdir: Option<&str>, auxdir: Option<&str>) {
        self.record(root, vec![BuildStep::new(outdir, auxdir)]);
    }

    pub fn clear(&self, root: &Path) {
        self.write().remove(root);
    }

    /// Snapshot of the steps recorded for `root`, oldest first
    pub fn steps(&self, root: &Path) -> Arc<[BuildStep]> {
        self.read()
            .get(root)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn latest_outdir(&self, root: &Path) -> Option<String> {
        self.steps(root)
            .iter()
            .rev()
            .find_map(|step| step.outdir.clone())
    }

    pub fn latest_auxdir(&self, root: &Path) -> Option<String> {
        self.steps(root)
            .iter()
            .rev()
            .find_map(|step| step.auxdir.clone())
    }

    /// Owned copy of every record, for persisting
    pub fn export(&self) -> BTreeMap<PathBuf, Vec<BuildStep>> {
        self.read()
            .iter()
            .map(|(root, steps)| (root.clone(), steps.to_vec()))
            .collect()
    }

    /// Replace all records with `records`
    pub fn import(&self, records: BTreeMap<PathBuf, Vec<BuildStep>>) {
        let mut guard = self.write();
        guard.clear();
        for (root, steps) in records {
            guard.insert(root, Arc::from(steps));
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<PathBuf, Arc<[BuildStep]>>> {
        self.steps.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<PathBuf, Arc<[BuildStep]>>> {
        self.steps.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
