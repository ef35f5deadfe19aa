//! CLI shell around `auditgate-core`.
//!
//! Owns everything the classification engine deliberately excludes: flag
//! parsing, the npm-version preflight, spawning `npm audit --json`, and
//! mapping the verdict onto the process exit status.

pub mod audit;
pub mod cli;

use anyhow::{Context, Result};
use auditgate_core::{Verdict, classify, parse_report};

pub use cli::Cli;

/// Preflight, run the audit, classify its output.
///
/// Returns the verdict to print and exit with; any error here (npm missing,
/// npm too old, unparseable report) is a pipeline defect, not a
/// vulnerability finding.
pub async fn run(cli: Cli) -> Result<Verdict> {
    audit::check_npm_version().await?;
    let raw = audit::run_audit(cli.registry.as_deref()).await?;
    let outcome = parse_report(&raw).context("could not parse npm audit output")?;
    Ok(classify(&outcome, &cli.policy()))
}
