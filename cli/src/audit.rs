//! External collaborators: the npm preflight check and the audit
//! subprocess. Plain I/O wrappers, no decision logic.

use anyhow::{Context, Result, bail};
use tokio::process::Command;

/// First npm major release shipping `npm audit`.
const MIN_NPM_MAJOR: u32 = 6;

/// Verify the installed npm is new enough to support `npm audit`.
pub async fn check_npm_version() -> Result<()> {
    let output = Command::new("npm")
        .arg("--version")
        .output()
        .await
        .context("failed to run `npm --version`")?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim();
    let major: u32 = version
        .split('.')
        .next()
        .unwrap_or_default()
        .parse()
        .with_context(|| format!("cannot parse npm version '{version}'"))?;
    if major < MIN_NPM_MAJOR {
        bail!(
            "npm {version} does not support `npm audit`; install a version >= {MIN_NPM_MAJOR}.0.0"
        );
    }
    Ok(())
}

/// Run `npm audit --json` and return its stdout.
///
/// The audit exits non-zero whenever it finds vulnerabilities, so its exit
/// status carries no signal for us; the JSON document alone drives
/// classification.
pub async fn run_audit(registry: Option<&str>) -> Result<String> {
    let mut command = Command::new("npm");
    command.args(["audit", "--json"]);
    if let Some(registry) = registry {
        command.arg(format!("--registry={registry}"));
    }

    tracing::debug!(registry, "running npm audit");
    let output = command.output().await.context("failed to run `npm audit`")?;
    if !output.stderr.is_empty() {
        tracing::debug!(
            stderr = %String::from_utf8_lossy(&output.stderr),
            "npm audit stderr"
        );
    }

    String::from_utf8(output.stdout).context("npm audit emitted non-UTF-8 output")
}
