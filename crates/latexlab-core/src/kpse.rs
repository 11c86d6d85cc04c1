//! kpsewhich lookups with memoization
//!
//! Successful lookups are cached for the lifetime of the resolver. Failures
//! (spawn errors, non-zero exit, empty output) are never cached, so they are
//! retried on every call.

use crate::process::{ProcessRequest, ProcessRunner};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    file_name: String,
    is_bib: bool,
}

/// Memoizing front of the `kpsewhich` binary
pub struct Kpsewhich {
    runner: Arc<dyn ProcessRunner>,
    cache: Mutex<HashMap<CacheKey, String>>,
}

impl Kpsewhich {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self {
            runner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Arguments passed to kpsewhich for one lookup
    pub fn args(file_name: &str, is_bib: bool) -> Vec<String> {
        if is_bib {
            vec!["-format=.bib".to_string(), file_name.to_string()]
        } else {
            vec![file_name.to_string()]
        }
    }

    /// Resolve `file_name` with the kpsewhich binary at `binary`
    pub fn resolve(&self, binary: &str, file_name: &str, is_bib: bool) -> Option<String> {
        let key = CacheKey {
            file_name: file_name.to_string(),
            is_bib,
        };
        if let Some(hit) = self.lock().get(&key) {
            return Some(hit.clone());
        }

        let args = Self::args(file_name, is_bib);
        let output = match self.runner.run(ProcessRequest::new(binary, &args)) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!("Failed to run {} for {}: {}", binary, file_name, e);
                return None;
            }
        };

        if !output.success() {
            tracing::debug!(
                "{} {:?} exited with {:?}: {}",
                binary,
                args,
                output.status,
                output.stderr.trim()
            );
            return None;
        }

        let resolved = output.stdout.trim();
        if resolved.is_empty() {
            return None;
        }

        tracing::debug!("kpsewhich resolved {} to {}", file_name, resolved);
        self.lock().insert(key, resolved.to_string());
        Some(resolved.to_string())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<CacheKey, String>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl std::fmt::Debug for Kpsewhich {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Kpsewhich")
            .field("cached", &self.lock().len())
            .finish()
    }
}
