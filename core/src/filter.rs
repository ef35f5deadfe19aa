//! The three-stage advisory filter pipeline.
//!
//! Each stage is a pure predicate applied in sequence: dependency scope,
//! then severity, then whitelist. Stages only narrow the candidate set;
//! document order is preserved end to end, and running the pipeline twice
//! on the same inputs yields identical output.

use crate::policy::Policy;
use crate::report::{Advisory, AuditReport};

/// Apply the filter pipeline, returning the surviving advisories in their
/// original order.
pub fn filter_advisories<'a>(report: &'a AuditReport, policy: &Policy) -> Vec<&'a Advisory> {
    report
        .advisories
        .iter()
        .filter(|advisory| passes_scope(advisory, policy))
        .filter(|advisory| passes_severity(advisory, policy))
        .filter(|advisory| passes_whitelist(advisory, policy))
        .collect()
}

/// Stage A: drop dev-scoped advisories when the policy ignores dev
/// dependencies. An advisory's scope is its first finding's dev flag,
/// normalized at ingestion.
fn passes_scope(advisory: &Advisory, policy: &Policy) -> bool {
    !(policy.ignore_dev && advisory.first_finding().dev)
}

/// Stage B: keep advisories at or above the threshold. Ties pass.
fn passes_severity(advisory: &Advisory, policy: &Policy) -> bool {
    advisory.severity.ordinal() >= policy.threshold.ordinal()
}

/// Stage C: drop the advisory on the first matching whitelist entry.
fn passes_whitelist(advisory: &Advisory, policy: &Policy) -> bool {
    !policy.whitelist.iter().any(|entry| entry.matches(advisory))
}
