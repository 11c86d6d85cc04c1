use crate::exec::{exec_tool, prepare_tool};
use crate::recipe::{recipe_tools, select_recipe};
use chrono::{DateTime, Utc};
use latexlab_core::{BuildStep, LatexlabError, Result, Session, path};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Options for one build
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Recipe name; `None` follows `latex.recipe.default`
    pub recipe: Option<String>,
}

/// Outcome of one tool
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub tool: String,
    pub program: String,
    pub args: Vec<String>,
    /// `None` when the tool could not be started or was killed
    pub exit_code: Option<i32>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub stderr: String,
}

impl StepReport {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Outcome of a whole recipe
#[derive(Debug, Clone, Serialize)]
pub struct BuildReport {
    pub document: PathBuf,
    pub recipe: String,
    pub steps: Vec<StepReport>,
    pub success: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub pdf: String,
}

impl BuildReport {
    /// The step that stopped the build
    pub fn failed_step(&self) -> Option<&StepReport> {
        self.steps.iter().find(|step| !step.success())
    }

    /// Turn a failed build into its error
    pub fn check(self) -> Result<Self> {
        match self.failed_step() {
            None => Ok(self),
            Some(step) => Err(match (step.exit_code, &step.error) {
                (_, Some(message)) => LatexlabError::ToolExecFailed(message.clone()),
                (Some(code), None) => LatexlabError::BuildFailed {
                    tool: step.tool.clone(),
                    code,
                },
                (None, None) => LatexlabError::ToolExecFailed(format!(
                    "{} was terminated by a signal",
                    step.tool
                )),
            }),
        }
    }
}

/// Compile the target document with the selected recipe
///
/// Tools run in order and the build stops at the first one that fails.
/// Whatever ran is recorded as the document's build memory, so the output
/// directory of the last successful tool stays visible to the resolvers.
/// Configuration errors (no root, unknown recipe or tool) fail before any
/// tool runs; tool failures are reported in [`BuildReport`], see
/// [`BuildReport::check`].
pub fn build(session: &Session, options: &BuildOptions) -> Result<BuildReport> {
    let document = session
        .build_target()
        .ok_or(LatexlabError::NoRootDocument)?;

    let config = session.config();
    let recipe = select_recipe(&config, options.recipe.as_deref())?;
    let tools = recipe_tools(&config, recipe)?;
    tracing::info!(
        "Building {} with recipe '{}'",
        document.display(),
        recipe.name
    );

    let started_at = Utc::now();
    let mut steps: Vec<StepReport> = Vec::with_capacity(tools.len());
    let mut recorded: Vec<BuildStep> = Vec::with_capacity(tools.len());

    for tool in tools {
        let prepared = prepare_tool(session, tool, &document);
        recorded.push(prepared.dirs.clone());

        let report = match exec_tool(session.runner().as_ref(), &prepared) {
            Ok(result) => StepReport {
                tool: prepared.name,
                program: prepared.program,
                args: prepared.args,
                exit_code: result.exit_code,
                duration_ms: result.duration_ms,
                error: None,
                stderr: result.stderr,
            },
            Err(e) => StepReport {
                tool: prepared.name,
                program: prepared.program,
                args: prepared.args,
                exit_code: None,
                duration_ms: 0,
                error: Some(e.to_string()),
                stderr: String::new(),
            },
        };

        let failed = !report.success();
        if failed {
            tracing::warn!("{} failed ({:?})", report.tool, report.exit_code);
        }
        steps.push(report);
        if failed {
            break;
        }
    }

    let pdf = built_pdf(session, &document, &recorded);
    session.memory().record(&document, recorded);

    let finished_at = Utc::now();
    let duration_ms = (finished_at - started_at).num_milliseconds().max(0) as u64;
    let success = steps.iter().all(StepReport::success);

    Ok(BuildReport {
        pdf,
        document,
        recipe: recipe.name.clone(),
        steps,
        success,
        started_at,
        finished_at,
        duration_ms,
    })
}

/// Where the build put the PDF: the newest reported output directory, else
/// the configured one
fn built_pdf(session: &Session, document: &Path, steps: &[BuildStep]) -> String {
    match steps.iter().rev().find_map(|step| step.outdir.as_deref()) {
        Some(outdir) => {
            let tex_dir = path::parent(&path::to_slash(document));
            let file_name = format!("{}.pdf", session.jobname(document));
            path::join(&path::join(&tex_dir, outdir), &file_name)
        }
        None => session.pdf_path(document),
    }
}
