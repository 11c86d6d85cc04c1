//! Build command - compile the root document with a recipe

use crate::context::Context;
use crate::output::print_json;
use anyhow::Result;
use colored::Colorize;
use latexlab_build::{BuildOptions, BuildReport, build};
use latexlab_core::state::LastBuild;

/// Build the root document
///
/// The build memory and a summary of the build are saved to state.json
/// whether or not the build succeeds.
pub fn run(ctx: &mut Context, recipe: Option<String>, json: bool) -> Result<()> {
    if ctx.verbose && !json {
        if let Some(root) = ctx.session.root() {
            println!("{} Building {}", "→".cyan(), root.path.display());
        }
    }

    let report = build(&ctx.session, &BuildOptions { recipe })?;

    let error = report.clone().check().err().map(|e| e.to_string());
    ctx.state.set_last_build(LastBuild {
        document: report.document.clone(),
        recipe: report.recipe.clone(),
        success: report.success,
        started_at: report.started_at,
        finished_at: report.finished_at,
        duration_ms: report.duration_ms,
        pdf: report.pdf.clone(),
        error,
    });
    ctx.save_state()?;

    if json {
        print_json(&report)?;
    } else {
        render_human(&report, ctx.verbose);
    }

    report.check()?;
    Ok(())
}

fn render_human(report: &BuildReport, verbose: bool) {
    for step in &report.steps {
        if step.success() {
            println!(
                "{} {} ({} ms)",
                "✓".green().bold(),
                step.tool,
                step.duration_ms
            );
            if verbose {
                println!("  Command: {} {}", step.program, step.args.join(" "));
            }
            continue;
        }

        eprintln!("{} {} failed", "✗".red().bold(), step.tool);
        eprintln!("  Command: {} {}", step.program, step.args.join(" "));
        match (&step.error, step.exit_code) {
            (Some(error), _) => eprintln!("  {}", error),
            (None, Some(code)) => eprintln!("  Exit code: {}", code),
            (None, None) => eprintln!("  Terminated by a signal"),
        }
        if !step.stderr.is_empty() {
            eprintln!("Stderr:\n{}", step.stderr);
        }
    }

    if report.success {
        println!(
            "{} Built {} in {} ms",
            "✓".green().bold(),
            report.pdf,
            report.duration_ms
        );
    }
}
