//! changelens: commit history digest for AI assistant instruction files
//!
//! Reads the commits since the last recorded range start, classifies the
//! files each one touched and prints a grouped report to stdout.

use std::process::ExitCode;

use anyhow::Context;
use changelens::analyzer::{Analyzer, AnalyzerOptions};
use changelens::config::ReportConfig;
use changelens::logging;
use changelens::metadata::Metadata;
use changelens::report::write_report;
use changelens_git::{History, SystemGit};
use clap::Parser;
use tracing::info;

fn main() -> ExitCode {
    let config = ReportConfig::parse();
    logging::init(config.log_level());

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &ReportConfig) -> anyhow::Result<()> {
    config.validate()?;

    let repo_path = config.repo_path();
    let git = SystemGit::discover(&repo_path).context("Not in a git repository")?;
    info!(repo = %git.workdir().display(), "Analysing repository");

    let metadata = Metadata::load(&config.metadata_path(git.workdir()));
    let analyzer = Analyzer::new(History::new(git), AnalyzerOptions::from(config));
    let analysis = analyzer.run(config.start_commit.as_deref(), &metadata);
    let report = analysis.render(config.format, &chrono::Local::now())?;

    println!("{report}");

    if let Some(path) = &config.output {
        write_report(path, &report)?;
        info!(path = %path.display(), "Report written");
    }
    Ok(())
}
