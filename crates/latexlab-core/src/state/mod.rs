use crate::error::{LatexlabError, Result};
use crate::lock;
use crate::memory::{BuildMemory, BuildStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory holding per-project state, next to the root document
pub const STATE_DIR: &str = ".latexlab";
pub const STATE_FILE: &str = "state.json";
const LOCK_FILE: &str = "state.lock";

/// state.json schema: disposable cache of build results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub schema_version: String,
    pub machine: MachineInfo,
    #[serde(default)]
    pub build: Option<BuildState>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineInfo {
    pub os: String,
    pub arch: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildState {
    /// Steps of the latest build, keyed by the compiled document
    #[serde(default)]
    pub steps: BTreeMap<PathBuf, Vec<BuildStep>>,
    pub last: Option<LastBuild>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastBuild {
    pub document: PathBuf,
    pub recipe: String,
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub pdf: String,
    pub error: Option<String>,
}

impl State {
    pub fn empty() -> Self {
        Self {
            schema_version: "1.0".to_string(),
            machine: MachineInfo::detect(),
            build: None,
        }
    }

    /// Path of state.json for a root document directory
    pub fn path_for(root_dir: &Path) -> PathBuf {
        root_dir.join(STATE_DIR).join(STATE_FILE)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let parent = ensure_parent_dir(path)?;
        let _guard = acquire_state_lock_shared(parent)?;

        let content = std::fs::read_to_string(path)
            .map_err(|e| LatexlabError::StateReadError(format!("Failed to read: {}", e)))?;

        let state: Self = serde_json::from_str(&content)
            .map_err(|e| LatexlabError::StateReadError(format!("Failed to parse: {}", e)))?;

        match state.schema_version.as_str() {
            "1.0" => Ok(state),
            version => Err(LatexlabError::StateInvalidSchema(version.to_string())),
        }
    }

    /// Write state.json atomically under an exclusive lock
    ///
    /// The content goes to a temporary file in the same directory, is synced,
    /// then persisted over the target, so readers never see a partial file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let parent = ensure_parent_dir(path)?;
        let _lock = acquire_state_lock(parent)?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| LatexlabError::StateWriteError(format!("Failed to serialize: {}", e)))?;
        atomic_write_json(&content, path, parent)
    }

    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::empty();
        }
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable {}: {}", path.display(), e);
            Self::empty()
        })
    }

    /// Seed `memory` with the persisted build steps
    pub fn restore_memory(&self, memory: &BuildMemory) {
        if let Some(build) = &self.build {
            memory.import(build.steps.clone());
        }
    }

    /// Replace the persisted build steps with the contents of `memory`
    pub fn capture_memory(&mut self, memory: &BuildMemory) {
        self.build.get_or_insert_with(BuildState::default).steps = memory.export();
    }

    pub fn last_build(&self) -> Option<&LastBuild> {
        self.build.as_ref().and_then(|build| build.last.as_ref())
    }

    pub fn set_last_build(&mut self, last: LastBuild) {
        self.build.get_or_insert_with(BuildState::default).last = Some(last);
    }
}

fn ensure_parent_dir(path: &Path) -> Result<&Path> {
    let parent = path.parent().ok_or_else(|| {
        LatexlabError::StateWriteError("State path has no parent directory".to_string())
    })?;
    std::fs::create_dir_all(parent).map_err(|e| {
        LatexlabError::StateWriteError(format!("Failed to create parent dir: {}", e))
    })?;
    Ok(parent)
}

fn acquire_state_lock(parent: &Path) -> Result<lock::LockGuard> {
    lock::acquire_lock(
        &parent.join(LOCK_FILE),
        Duration::from_secs(30),
        "state update",
    )
    .map_err(|e| LatexlabError::StateWriteError(format!("Failed to acquire lock: {}", e)))
}

fn acquire_state_lock_shared(parent: &Path) -> Result<lock::LockGuard> {
    lock::acquire_shared_lock(&parent.join(LOCK_FILE), Duration::from_secs(5), "state read")
        .map_err(|e| {
            LatexlabError::StateReadError(format!("Failed to acquire shared lock: {}", e))
        })
}

fn atomic_write_json(content: &str, path: &Path, parent: &Path) -> Result<()> {
    use std::io::Write;
    use tempfile::NamedTempFile;

    let write_error = |step: &str, e: &dyn std::fmt::Display| {
        LatexlabError::StateWriteError(format!("Failed to {}: {}", step, e))
    };

    let mut temp_file =
        NamedTempFile::new_in(parent).map_err(|e| write_error("create temp file", &e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| write_error("write temp file", &e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| write_error("sync temp file", &e))?;
    temp_file
        .persist(path)
        .map_err(|e| write_error("persist temp file", &e))?;

    #[cfg(unix)]
    {
        let parent_file =
            std::fs::File::open(parent).map_err(|e| write_error("open parent dir", &e))?;
        parent_file
            .sync_all()
            .map_err(|e| write_error("sync parent dir", &e))?;
    }

    Ok(())
}

impl MachineInfo {
    pub fn detect() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
        }
    }
}
