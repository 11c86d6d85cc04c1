//! Integration tests for recipe execution

use latexlab_build::{BuildOptions, build};
use latexlab_core::config::{Config, Recipe, SharedConfig, Tool};
use latexlab_core::{LatexlabError, RootDocument, Session, SubFile};
use latexlab_testkit::{ScriptedRunner, fixture_memory_fs};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ROOT: &str = "/fixture";

fn tool(name: &str, command: &str, args: &[&str]) -> Tool {
    Tool {
        name: name.to_string(),
        command: command.to_string(),
        args: args.iter().map(|s| s.to_string()).collect(),
        env: BTreeMap::new(),
    }
}

fn session_with_tools(
    tools: Vec<Tool>,
    recipes: Vec<Recipe>,
) -> (Session, Arc<SharedConfig>, Arc<ScriptedRunner>) {
    let config = Arc::new(SharedConfig::new(Config::default()));
    config.update(|c| {
        c.latex.tools = tools;
        c.latex.recipes = recipes;
    });
    let runner = Arc::new(ScriptedRunner::new());
    let mut session = Session::new(config.clone())
        .with_fs(Arc::new(fixture_memory_fs(Path::new(ROOT))))
        .with_runner(runner.clone());
    session.set_root(RootDocument::new(Path::new(ROOT).join("main.tex")));
    (session, config, runner)
}

fn single(args: &[&str]) -> (Session, Arc<SharedConfig>, Arc<ScriptedRunner>) {
    session_with_tools(
        vec![tool("latexmk", "/usr/bin/true", args)],
        vec![Recipe {
            name: "latexmk".to_string(),
            tools: vec!["latexmk".to_string()],
        }],
    )
}

#[test]
fn test_build_expands_doc_and_runs_in_document_dir() {
    // Arrange
    let (session, _, runner) = single(&["-pdf", "%DOC%"]);

    // Act
    let report = build(&session, &BuildOptions::default()).unwrap();

    // Assert
    assert!(report.success);
    let call = &runner.calls()[0];
    assert_eq!(call.command_line(), vec!["/usr/bin/true", "-pdf", "/fixture/main"]);
    assert_eq!(call.cwd.as_deref(), Some(Path::new(ROOT)));
}

#[test]
fn test_build_expands_repeated_placeholders() {
    let (session, _, runner) = single(&["-pdf", "%DOC%", "%DOC%", "%DOC%"]);

    build(&session, &BuildOptions::default()).unwrap();

    assert_eq!(
        runner.calls()[0].args,
        vec!["-pdf", "/fixture/main", "/fixture/main", "/fixture/main"]
    );
}

#[test]
fn test_build_with_spaces_in_document_name() {
    let (mut session, _, runner) = single(&["-pdf", "%DOC%"]);
    session.set_root(RootDocument::new("/fixture/document with spaces.tex"));

    build(&session, &BuildOptions::default()).unwrap();

    assert_eq!(runner.calls()[0].args[1], "/fixture/document with spaces");
}

#[test]
fn test_build_uses_sub_file_when_enabled() {
    // Arrange
    let (mut session, config, runner) = single(&["-pdf", "%DOC%"]);
    session.set_subfile(Some(SubFile::new("/fixture/sub/s.tex")));
    config.update(|c| c.latex.root_file.use_sub_file = true);

    // Act
    let report = build(&session, &BuildOptions::default()).unwrap();

    // Assert
    assert_eq!(runner.calls()[0].args[1], "/fixture/sub/s");
    assert_eq!(runner.calls()[0].cwd.as_deref(), Some(Path::new("/fixture/sub")));
    assert_eq!(report.document, PathBuf::from("/fixture/sub/s.tex"));
}

#[test]
fn test_build_ignores_sub_file_when_disabled() {
    let (mut session, _, runner) = single(&["-pdf", "%DOC%"]);
    session.set_subfile(Some(SubFile::new("/fixture/sub/s.tex")));

    build(&session, &BuildOptions::default()).unwrap();

    assert_eq!(runner.calls()[0].args[1], "/fixture/main");
}

#[test]
fn test_build_without_root_fails() {
    let (mut session, _, runner) = single(&["%DOC%"]);
    session.clear_root();

    let err = build(&session, &BuildOptions::default()).unwrap_err();

    assert!(matches!(err, LatexlabError::NoRootDocument));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn test_build_unknown_recipe_fails_before_running() {
    let (session, _, runner) = single(&["%DOC%"]);

    let err = build(
        &session,
        &BuildOptions {
            recipe: Some("missing".to_string()),
        },
    )
    .unwrap_err();

    assert!(matches!(err, LatexlabError::RecipeNotFound(_)));
    assert_eq!(runner.call_count(), 0);
}

#[test]
fn test_build_stops_at_first_failure() {
    // Arrange
    let (session, _, runner) = session_with_tools(
        vec![
            tool("first", "/bin/first", &["%DOC%"]),
            tool("second", "/bin/second", &["%DOC%"]),
        ],
        vec![Recipe {
            name: "chain".to_string(),
            tools: vec!["first".to_string(), "second".to_string()],
        }],
    );
    runner.push_output(12, "");

    // Act
    let report = build(&session, &BuildOptions::default()).unwrap();

    // Assert
    assert!(!report.success);
    assert_eq!(report.steps.len(), 1);
    assert_eq!(runner.call_count(), 1);
    let err = report.check().unwrap_err();
    assert!(matches!(err, LatexlabError::BuildFailed { ref tool, code: 12 } if tool == "first"));
}

#[test]
fn test_build_spawn_failure_reported() {
    let (session, _, runner) = single(&["%DOC%"]);
    runner.push_spawn_error("no such file");

    let report = build(&session, &BuildOptions::default()).unwrap();

    assert!(!report.success);
    assert!(matches!(report.check(), Err(LatexlabError::ToolExecFailed(_))));
}

#[test]
fn test_build_records_outdir_for_resolvers() {
    // Arrange
    let (session, _, _) = single(&["-outdir=/fixture/build", "-auxdir=aux", "%DOC%"]);
    let root = Path::new("/fixture/main.tex");

    // Act
    let report = build(&session, &BuildOptions::default()).unwrap();

    // Assert
    assert_eq!(
        session.memory().latest_outdir(root).as_deref(),
        Some("/fixture/build")
    );
    assert_eq!(session.memory().latest_auxdir(root).as_deref(), Some("aux"));
    assert_eq!(session.out_dir(None), "/fixture/build");
    assert_eq!(report.pdf, "/fixture/build/main.pdf");
}

#[test]
fn test_build_outdir_placeholder_follows_config() {
    let (session, config, runner) = single(&["-outdir=%OUTDIR%", "%DOC%"]);
    config.update(|c| c.latex.out_dir = "%DIR%/out".to_string());

    let report = build(&session, &BuildOptions::default()).unwrap();

    assert_eq!(runner.calls()[0].args[0], "-outdir=/fixture/out");
    assert_eq!(report.pdf, "/fixture/out/main.pdf");
}

#[test]
fn test_build_replaces_previous_memory() {
    let (session, _, _) = single(&["%DOC%"]);
    let root = Path::new("/fixture/main.tex");
    session.memory().set_tex_dirs(root, Some("/stale"), Some("stale-aux"));

    build(&session, &BuildOptions::default()).unwrap();

    assert_eq!(session.memory().latest_outdir(root), None);
    assert_eq!(session.memory().latest_auxdir(root), None);
}

#[test]
fn test_build_passes_tool_env() {
    let mut latexmk = tool("latexmk", "/usr/bin/true", &["%DOC%"]);
    latexmk
        .env
        .insert("TEXINPUTS".to_string(), "%DIR%/styles:".to_string());
    let (session, _, runner) = session_with_tools(
        vec![latexmk],
        vec![Recipe {
            name: "latexmk".to_string(),
            tools: vec!["latexmk".to_string()],
        }],
    );

    build(&session, &BuildOptions::default()).unwrap();

    assert_eq!(
        runner.calls()[0].env.get("TEXINPUTS").map(String::as_str),
        Some("/fixture/styles:")
    );
}
