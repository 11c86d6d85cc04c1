//! Test doubles for the filesystem and process seams

use latexlab_core::fs::FileSystem;
use latexlab_core::process::{ProcessOutput, ProcessRequest, ProcessRunner};
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, RwLock};

/// In-memory filesystem
///
/// Directories exist implicitly as prefixes of file paths. Listings follow
/// file insertion order, which makes wildcard results deterministic.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RwLock<Vec<(PathBuf, String)>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.add_file(path, content);
        self
    }

    /// Add or overwrite a file
    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        let mut files = self.files.write().unwrap_or_else(|p| p.into_inner());
        match files.iter_mut().find(|(existing, _)| *existing == path) {
            Some(entry) => entry.1 = content,
            None => files.push((path, content)),
        }
    }

    pub fn remove_file(&self, path: &Path) {
        self.files
            .write()
            .unwrap_or_else(|p| p.into_inner())
            .retain(|(existing, _)| existing != path);
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .any(|(file, _)| file != path && file.starts_with(path))
    }
}

impl FileSystem for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        let is_file = self
            .files
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .any(|(file, _)| file == path);
        is_file || self.is_dir(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .iter()
            .find(|(file, _)| file == path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        if !self.is_dir(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                path.display().to_string(),
            ));
        }

        let files = self.files.read().unwrap_or_else(|p| p.into_inner());
        let mut names: Vec<String> = Vec::new();
        for (file, _) in files.iter() {
            let Ok(rest) = file.strip_prefix(path) else {
                continue;
            };
            let Some(first) = rest.components().next() else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().into_owned();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

/// One invocation seen by [`ScriptedRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
}

impl RecordedCall {
    /// Program followed by its arguments
    pub fn command_line(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

#[derive(Debug, Clone)]
enum Response {
    Output(ProcessOutput),
    SpawnError(String),
}

/// Process runner that replays queued responses and records every call
///
/// Once the queue is drained every call gets the fallback response, a
/// successful exit with no output unless changed.
#[derive(Debug)]
pub struct ScriptedRunner {
    queue: Mutex<VecDeque<Response>>,
    fallback: Mutex<Response>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
            fallback: Mutex::new(Response::Output(exit(0, ""))),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a process that exits with `status` after printing `stdout`
    pub fn push_output(&self, status: i32, stdout: &str) -> &Self {
        lock(&self.queue).push_back(Response::Output(exit(status, stdout)));
        self
    }

    /// Queue a spawn failure
    pub fn push_spawn_error(&self, message: &str) -> &Self {
        lock(&self.queue).push_back(Response::SpawnError(message.to_string()));
        self
    }

    /// Response for calls beyond the queue
    pub fn set_fallback(&self, status: i32, stdout: &str) -> &Self {
        *lock(&self.fallback) = Response::Output(exit(status, stdout));
        self
    }

    /// Make every call beyond the queue fail to spawn
    pub fn set_fallback_spawn_error(&self, message: &str) -> &Self {
        *lock(&self.fallback) = Response::SpawnError(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

impl ProcessRunner for ScriptedRunner {
    fn run(&self, request: ProcessRequest<'_>) -> io::Result<ProcessOutput> {
        lock(&self.calls).push(RecordedCall {
            program: request.program.to_string(),
            args: request.args.to_vec(),
            cwd: request.cwd.map(Path::to_path_buf),
            env: request.env.cloned().unwrap_or_default(),
        });

        let response = lock(&self.queue)
            .pop_front()
            .unwrap_or_else(|| lock(&self.fallback).clone());
        match response {
            Response::Output(output) => Ok(output),
            Response::SpawnError(message) => Err(io::Error::new(io::ErrorKind::NotFound, message)),
        }
    }
}

fn exit(status: i32, stdout: &str) -> ProcessOutput {
    ProcessOutput {
        status: Some(status),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
