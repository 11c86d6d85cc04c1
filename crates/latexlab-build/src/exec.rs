use crate::args::dirs_from_args;
use latexlab_core::config::Tool;
use latexlab_core::path;
use latexlab_core::process::{ProcessRequest, ProcessRunner};
use latexlab_core::{BuildStep, LatexlabError, Result, Session};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A tool ready to run against one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTool {
    pub name: String,
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: BTreeMap<String, String>,
    /// Directories the tool reports writing to
    pub dirs: BuildStep,
}

/// Result of one tool execution
#[derive(Debug, Clone)]
pub struct ExecResult {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl ExecResult {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Expand the arguments of `tool` for `doc` and resolve its binary
pub fn prepare_tool(session: &Session, tool: &Tool, doc: &Path) -> PreparedTool {
    let doc_slash = path::to_slash(doc);
    let placeholders = session.placeholders(Some(&doc_slash));
    let out_dir = session.out_dir(Some(doc));

    let args: Vec<String> = tool
        .args
        .iter()
        .map(|arg| placeholders.expand_with_outdir(arg, &out_dir))
        .collect();
    let env = tool
        .env
        .iter()
        .map(|(key, value)| (key.clone(), placeholders.expand_with_outdir(value, &out_dir)))
        .collect();

    PreparedTool {
        name: tool.name.clone(),
        program: resolve_program(&tool.command),
        dirs: dirs_from_args(&args),
        args,
        cwd: PathBuf::from(placeholders.dir()),
        env,
    }
}

/// Locate a bare command name on PATH; anything else is used as given
pub fn resolve_program(command: &str) -> String {
    if command.contains('/') || command.contains('\\') {
        return command.to_string();
    }
    match which::which(command) {
        Ok(found) => path::to_slash(&found),
        Err(e) => {
            tracing::debug!("{} not found on PATH ({}), running it by name", command, e);
            command.to_string()
        }
    }
}

/// Run a prepared tool to completion
///
/// Fails with `ToolExecFailed` only when the process cannot be spawned; a
/// non-zero exit is reported in the result.
pub fn exec_tool(runner: &dyn ProcessRunner, tool: &PreparedTool) -> Result<ExecResult> {
    tracing::info!("Running {}: {} {}", tool.name, tool.program, tool.args.join(" "));
    let start = Instant::now();

    let output = runner
        .run(
            ProcessRequest::new(&tool.program, &tool.args)
                .cwd(&tool.cwd)
                .env(&tool.env),
        )
        .map_err(|e| {
            LatexlabError::ToolExecFailed(format!("Failed to run {}: {}", tool.program, e))
        })?;

    let duration_ms = start.elapsed().as_millis() as u64;
    tracing::debug!(
        "{} exited with {:?} after {}ms",
        tool.name,
        output.status,
        duration_ms
    );

    Ok(ExecResult {
        exit_code: output.status,
        stdout: output.stdout,
        stderr: output.stderr,
        duration_ms,
    })
}
