// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! changelens-metadata: move the recorded range start to HEAD
//!
//! Run after refreshing the AI assistant instructions so the next
//! `changelens` report only covers newer commits.

use std::process::ExitCode;

use anyhow::Context;
use changelens::config::MetadataConfig;
use changelens::logging;
use changelens::metadata::{UpdateOptions, update_metadata};
use changelens_git::{History, SystemGit};
use clap::Parser;

fn main() -> ExitCode {
    let config = MetadataConfig::parse();
    logging::init(config.log_level());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &MetadataConfig) -> anyhow::Result<()> {
    config.validate()?;

    let git = SystemGit::discover(config.repo_path()).context("Not in a git repository")?;
    let path = config.metadata_path(git.workdir());
    let history = History::new(git);

    let options = UpdateOptions {
        dry_run: config.dry_run,
        commit_message: config.commit.clone(),
    };
    let update = update_metadata(&history, &path, &options)
        .with_context(|| format!("Failed to update {}", path.display()))?;

    if update.written {
        println!("Updated {}", path.display());
    } else {
        println!("Dry run: {} not modified", path.display());
        println!("{}", update.after.to_pretty_json()?);
    }
    println!("{update}");

    Ok(())
}
