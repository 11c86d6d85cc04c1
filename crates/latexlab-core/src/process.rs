//! Process invocation seam
//!
//! Both the kpsewhich resolver and the build run external programs
//! synchronously through [`ProcessRunner`], so tests can script exit codes
//! and output without a TeX installation.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;
use std::process::Command;

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code; `None` when terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// One process invocation
#[derive(Debug, Clone, Copy)]
pub struct ProcessRequest<'a> {
    pub program: &'a str,
    pub args: &'a [String],
    pub cwd: Option<&'a Path>,
    pub env: Option<&'a BTreeMap<String, String>>,
}

impl<'a> ProcessRequest<'a> {
    pub fn new(program: &'a str, args: &'a [String]) -> Self {
        Self {
            program,
            args,
            cwd: None,
            env: None,
        }
    }

    pub fn cwd(mut self, cwd: &'a Path) -> Self {
        self.cwd = Some(cwd);
        self
    }

    pub fn env(mut self, env: &'a BTreeMap<String, String>) -> Self {
        self.env = Some(env);
        self
    }
}

pub trait ProcessRunner: Send + Sync {
    /// Run to completion; `Err` only when the process could not be spawned
    fn run(&self, request: ProcessRequest<'_>) -> io::Result<ProcessOutput>;
}

/// Runs programs with `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, request: ProcessRequest<'_>) -> io::Result<ProcessOutput> {
        let mut command = Command::new(request.program);
        command.args(request.args);
        if let Some(cwd) = request.cwd {
            command.current_dir(cwd);
        }
        if let Some(env) = request.env {
            command.envs(env);
        }

        let output = command.output()?;
        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
