//! `license-grouper` — collect production dependencies, resolve their license
//! text, and group dependencies sharing identical text.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and install the logger ([`logger`]).
//! 2. Load config ([`config::load_config`]).
//! 3. Walk the installed dependency tree ([`analyzer`]).
//! 4. Resolve and group license content ([`resolver`]).
//! 5. Render the requested report ([`report`]).
//! 6. Exit `0`, or `1` when the project could not be scanned.

mod analyzer;
mod cli;
mod config;
mod error;
mod fs;
mod logger;
mod models;
mod report;
mod resolver;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use analyzer::node::NodeAnalyzer;
use cli::{Cli, ReportFormat};
use config::load_config;
use error::ResolveError;
use fs::TokioFileSystem;
use resolver::LicenseResolver;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose, cli.quiet);

    // Resolve project path
    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;

    let mut exclude = config.scan.exclude;
    exclude.extend(cli.exclude);

    let resolver = LicenseResolver::new(NodeAnalyzer::new(), TokioFileSystem).with_exclude(exclude);

    let groups = match resolver.resolve_project_licenses(&path).await {
        Ok(groups) => groups,
        // Already logged by the resolver.
        Err(ResolveError::DirectoryNotFound(_)) => std::process::exit(1),
        Err(err) => {
            tracing::error!("{:#}", err);
            std::process::exit(1);
        }
    };
    info!(
        "Grouped {} dependencies into {} licenses",
        groups.iter().map(|g| g.dependencies.len()).sum::<usize>(),
        groups.len()
    );

    let report_format = cli.report.or(config.report.format).unwrap_or_default();
    let output = cli.output.or(config.report.output);

    match report_format {
        ReportFormat::Terminal => {
            report::terminal::render(&groups, &path, cli.verbose, cli.quiet);
        }
        ReportFormat::Json => {
            report::emit(&report::json::render(&groups)?, output.as_deref(), cli.quiet)?;
        }
        ReportFormat::Text => {
            report::emit(&report::text::render(&groups), output.as_deref(), cli.quiet)?;
        }
    }

    Ok(())
}
