//! Advisory file locks guarding `.latexlab/state.json`
//!
//! Locks are held on a sibling `state.lock` file through fs2 and released
//! when the [`LockGuard`] is dropped.

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);
const PROGRESS_MESSAGE_THRESHOLD: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum LockError {
    #[error("timeout waiting for lock on {} ({description})", path.display())]
    Timeout { path: PathBuf, description: String },

    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    },
}

/// Held lock; released on drop
#[derive(Debug)]
pub struct LockGuard {
    _file: File,
    path: PathBuf,
}

impl LockGuard {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Exclusive,
    Shared,
}

/// Acquire an exclusive lock, retrying with backoff until `timeout`
pub fn acquire_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire_with_retry(lock_path, timeout, description, Mode::Exclusive)
}

/// Acquire a shared lock; any number of readers may hold one at once
pub fn acquire_shared_lock(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
) -> Result<LockGuard, LockError> {
    acquire_with_retry(lock_path, timeout, description, Mode::Shared)
}

fn acquire_with_retry(
    lock_path: &Path,
    timeout: Duration,
    description: &str,
    mode: Mode,
) -> Result<LockGuard, LockError> {
    let io_error = |operation| {
        move |source| LockError::Io {
            source,
            path: lock_path.to_path_buf(),
            operation,
        }
    };

    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(io_error("create parent directories"))?;
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path)
        .map_err(io_error("open lock file"))?;

    let start = Instant::now();
    let mut retry_delay = INITIAL_RETRY_DELAY;
    let mut progress_shown = false;

    loop {
        let attempt = match mode {
            Mode::Exclusive => FileExt::try_lock_exclusive(&file),
            Mode::Shared => FileExt::try_lock_shared(&file),
        };

        match attempt {
            Ok(()) => {
                return Ok(LockGuard {
                    _file: file,
                    path: lock_path.to_path_buf(),
                });
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Err(LockError::Timeout {
                        path: lock_path.to_path_buf(),
                        description: description.to_string(),
                    });
                }

                if !progress_shown && elapsed >= PROGRESS_MESSAGE_THRESHOLD {
                    tracing::info!(
                        "Waiting for lock on {} ({})...",
                        lock_path.display(),
                        description
                    );
                    progress_shown = true;
                }

                thread::sleep(retry_delay);
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => return Err(io_error("acquire lock")(e)),
        }
    }
}
