//! Audit-result classification engine for the `auditgate` CI gate.
//!
//! Takes the JSON document produced by `npm audit --json`, applies the
//! user-supplied policy (severity threshold, dev-dependency exclusion,
//! whitelist exceptions), and produces a build-pass/build-fail verdict plus
//! the text to show for it.
//!
//! The whole crate is a pure transform: one report and one policy in, one
//! [`Verdict`] out. Subprocess invocation, flag parsing, and terminal output
//! live in the `auditgate-cli` crate.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod classify;
pub mod error;
pub mod filter;
pub mod policy;
pub mod report;
pub mod severity;
pub mod whitelist;

pub use classify::{ExitStatus, Verdict, classify};
pub use error::{InvalidSeverity, ReportError, Result};
pub use filter::filter_advisories;
pub use policy::Policy;
pub use report::{Advisory, AuditOutcome, AuditReport, Finding, parse_report};
pub use severity::Severity;
pub use whitelist::WhitelistEntry;

/// Crate version, surfaced by the CLI `--version` output.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL for advisory reference links; the advisory identifier is
/// appended verbatim.
pub const ADVISORY_URL_BASE: &str = "https://www.npmjs.com/advisories/";
