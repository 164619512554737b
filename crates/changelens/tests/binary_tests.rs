// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Exit codes and file output of the built binaries


use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use test_utils::{TestDir, TestGitRepo};

fn run(bin: &str, args: &[&str], cwd: &Path) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(cwd)
        .env_remove("CHANGELENS_REPO")
        .env_remove("CHANGELENS_METADATA")
        .output()
        .expect("Failed to run binary")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_report_outside_repository_exits_with_one() {
    let dir = TestDir::new("report-norepo");
    let repo = dir.path().display().to_string();

    let output = run(env!("CARGO_BIN_EXE_changelens"), &["--repo", &repo], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    // Reported once on stderr, not once per sink
    assert_eq!(stderr(&output).matches("Not in a git repository").count(), 1);
}

#[test]
fn test_metadata_outside_repository_exits_with_one() {
    let dir = TestDir::new("metadata-norepo");
    let repo = dir.path().display().to_string();

    let output = run(
        env!("CARGO_BIN_EXE_changelens-metadata"),
        &["--repo", &repo, "--dry-run"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output).matches("Not in a git repository").count(), 1);
}

#[test]
fn test_report_output_creates_nested_directories() {
    let repo = TestGitRepo::new("bin-output");
    let start = repo.create_and_commit("README.md", "# Project\n", "Initial commit");
    repo.create_and_commit("src/app.py", "print('hi')\n", "Add app");
    let target = repo.path().join("reports").join("weekly").join("changes.md");
    let repo_arg = repo.path().display().to_string();
    let target_arg = target.display().to_string();

    let output = run(
        env!("CARGO_BIN_EXE_changelens"),
        &["--repo", &repo_arg, "--start-commit", &start, "--output", &target_arg],
        repo.path(),
    );

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let written = fs::read_to_string(&target).expect("report file written");
    assert_eq!(written, String::from_utf8_lossy(&output.stdout));
    assert!(written.contains("### 1. Add app"));
}
