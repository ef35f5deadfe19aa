//! Command-line flags.

use auditgate_core::{Policy, Severity, WhitelistEntry};
use clap::Parser;

/// CI gate around `npm audit`: fail the build when vulnerabilities exceed
/// the configured severity threshold and scope.
#[derive(Debug, Parser)]
#[command(name = "auditgate", version, about)]
pub struct Cli {
    /// Severity at which the audit fails the build (low, moderate, high,
    /// critical; case-insensitive)
    #[arg(short = 't', long, value_name = "LEVEL", default_value_t = Severity::Critical)]
    pub threshold: Severity,

    /// Ignore dev dependencies and only fail the build on runtime
    /// dependencies which exceed the threshold
    #[arg(short = 'p', long = "ignore-dev-dependencies")]
    pub ignore_dev_dependencies: bool,

    /// Do not fail; print the filtered report as JSON instead
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Alternate npm registry to audit against
    #[arg(short = 'r', long, value_name = "URL")]
    pub registry: Option<String>,

    /// Whitelist a module at one version (module:version), or at every
    /// version (module or module:*); repeatable
    #[arg(short = 'w', long = "whitelist", value_name = "MODULE[:VERSION]")]
    pub whitelist: Vec<String>,
}

impl Cli {
    /// Classification policy from the parsed flags.
    pub fn policy(&self) -> Policy {
        Policy {
            threshold: self.threshold,
            ignore_dev: self.ignore_dev_dependencies,
            whitelist: self
                .whitelist
                .iter()
                .map(|raw| WhitelistEntry::parse(raw))
                .collect(),
            json_output: self.json,
        }
    }
}
