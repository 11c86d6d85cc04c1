//! Integration tests for the latexlab CLI

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use latexlab_testkit::fixture_project;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Command running in `dir` with a clean temp environment
fn latexlab(dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.current_dir(dir)
        .env_remove("LATEXLAB_CONFIG")
        .env_remove("LATEXLAB_ROOT")
        .env_remove("RUST_LOG")
        .env("TMPDIR", std::env::temp_dir())
        .env_remove("TMP")
        .env_remove("TEMP");
    cmd
}

fn slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[test]
fn test_cli_help_flag() {
    let project = fixture_project();

    latexlab(project.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_cli_version_flag() {
    let project = fixture_project();

    latexlab(project.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("latexlab"));
}

#[test]
fn test_outdir_without_root_is_current_dir() {
    let project = fixture_project();

    latexlab(project.path())
        .arg("outdir")
        .assert()
        .success()
        .stdout("./\n");
}

#[test]
fn test_outdir_defaults_to_root_dir() {
    // Arrange
    let project = fixture_project();

    // Act
    let assert = latexlab(project.path())
        .args(["--root", "main.tex", "outdir"])
        .assert();

    // Assert
    assert
        .success()
        .stdout(format!("{}\n", slash(project.path())));
}

#[test]
fn test_pdf_with_configured_out_dir() {
    // Arrange
    let project = fixture_project();
    fs::write(
        project.path().join("latexlab.toml"),
        "[latex]\noutDir = \"./output/\"\n",
    )
    .unwrap();

    // Act & Assert
    latexlab(project.path())
        .args(["pdf", "main.tex"])
        .assert()
        .success()
        .stdout(format!("{}/output/main.pdf\n", slash(project.path())));
}

#[test]
fn test_explicit_config_must_parse() {
    let project = fixture_project();
    fs::write(project.path().join("broken.toml"), "[latex\n").unwrap();

    latexlab(project.path())
        .args(["--config", "broken.toml", "outdir"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_fls_found_and_missing() {
    let project = fixture_project();

    latexlab(project.path())
        .args(["fls", "main.tex"])
        .assert()
        .success()
        .stdout(format!("{}/main.fls\n", slash(project.path())));

    latexlab(project.path())
        .args(["fls", "another.tex"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No .fls file found"));
}

#[test]
fn test_jobname_json() {
    let project = fixture_project();

    let output = latexlab(project.path())
        .args(["jobname", "document with spaces.tex", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["jobname"], "document with spaces");
}

#[test]
fn test_bib_wildcard_json() {
    // Arrange
    let project = fixture_project();

    // Act
    let output = latexlab(project.path())
        .args(["bib", "*", "--base-dir", ".", "--json"])
        .output()
        .unwrap();

    // Assert
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let mut paths: Vec<String> = value["paths"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap().to_string())
        .collect();
    paths.sort();
    let root = slash(project.path());
    assert_eq!(
        paths,
        vec![format!("{root}/another.bib"), format!("{root}/main.bib")]
    );
}

#[test]
fn test_bib_missing_fails() {
    let project = fixture_project();

    latexlab(project.path())
        .args(["bib", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot find .bib file nonexistent"));
}

#[test]
fn test_bib_search_logged_under_verbose() {
    let project = fixture_project();

    latexlab(project.path())
        .args(["--verbose", "bib", "main"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Searched for main"));

    latexlab(project.path())
        .args(["bib", "main"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Searched for").not());
}

#[test]
fn test_lang_classification() {
    let project = fixture_project();

    latexlab(project.path())
        .args(["lang", "report.Rnw"])
        .assert()
        .success()
        .stdout("rsweave\n");

    latexlab(project.path())
        .args(["lang", "figure.png"])
        .assert()
        .success()
        .stdout("unknown\n");
}

#[test]
fn test_tmpdir_created_under_tmpdir_env() {
    let project = fixture_project();
    let base = tempfile::TempDir::new().unwrap();

    latexlab(project.path())
        .env("TMPDIR", base.path())
        .arg("tmpdir")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(slash(base.path())));
}

#[test]
fn test_tmpdir_rejects_quoted_base() {
    let project = fixture_project();

    latexlab(project.path())
        .env("TMPDIR", "/tmp/it's")
        .arg("tmpdir")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIGURATION_ERROR"));
}

#[test]
fn test_kpsewhich_with_missing_binary_fails() {
    let project = fixture_project();
    fs::write(
        project.path().join("latexlab.toml"),
        "[kpsewhich]\npath = \"/nonexistent/kpsewhich\"\n",
    )
    .unwrap();

    latexlab(project.path())
        .args(["kpsewhich", "article.cls"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not resolve article.cls"));
}

#[test]
#[cfg(unix)]
fn test_build_persists_outdir_for_later_commands() {
    // Arrange
    let project = fixture_project();
    fs::write(
        project.path().join("latexlab.toml"),
        r#"
[[latex.tools]]
name = "fake"
command = "sh"
args = ["-c", "exit 0", "-outdir=%DIR%/build"]

[[latex.recipes]]
name = "fake"
tools = ["fake"]
"#,
    )
    .unwrap();

    // Act
    latexlab(project.path())
        .args(["--root", "main.tex", "build"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fake"));

    // Assert
    assert!(project.path().join(".latexlab/state.json").exists());
    latexlab(project.path())
        .args(["--root", "main.tex", "outdir"])
        .assert()
        .success()
        .stdout(format!("{}/build\n", slash(project.path())));
}

#[test]
#[cfg(unix)]
fn test_build_failure_reports_exit_code() {
    let project = fixture_project();
    fs::write(
        project.path().join("latexlab.toml"),
        r#"
[[latex.tools]]
name = "broken"
command = "sh"
args = ["-c", "exit 3"]

[[latex.recipes]]
name = "broken"
tools = ["broken"]
"#,
    )
    .unwrap();

    latexlab(project.path())
        .args(["--root", "main.tex", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("BUILD_FAILED"));

    let state = fs::read_to_string(project.path().join(".latexlab/state.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&state).unwrap();
    assert_eq!(value["build"]["last"]["success"], false);
}

#[test]
fn test_build_without_root_fails() {
    let project = fixture_project();

    latexlab(project.path())
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("NO_ROOT_DOCUMENT"));
}
