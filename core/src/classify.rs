//! The pass/fail decision and its rendering.

use serde_json::Value;

use crate::filter::filter_advisories;
use crate::policy::Policy;
use crate::report::{Advisory, AuditOutcome};

/// Process exit status of a classification.
///
/// Usage errors and failed preflight checks carry their own codes in the
/// CLI layer; these three cover every outcome the classifier can produce.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExitStatus {
    /// No advisories, everything filtered out, or JSON mode.
    Pass,
    /// Unfiltered advisories remain in text mode.
    VulnerabilitiesFound,
    /// The audit service could not be reached.
    RegistryError,
}

impl ExitStatus {
    /// Numeric process exit code.
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Pass => 0,
            ExitStatus::VulnerabilitiesFound => 1,
            ExitStatus::RegistryError => 2,
        }
    }
}

/// Result of one classification pass: what to print, and how to exit.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub exit: ExitStatus,
    /// Rendered output, trailing newline included when non-empty.
    pub output: String,
}

/// Classify a parsed audit outcome against the policy.
///
/// Decision sequence, each step a hard gate:
/// 1. a registry error short-circuits with its own exit status;
/// 2. zero advisories pass, with either a fixed message or the normalized
///    document in JSON mode;
/// 3. otherwise the filter pipeline runs, and the survivors decide the
///    verdict. JSON mode is inspection-only and always passes.
pub fn classify(outcome: &AuditOutcome, policy: &Policy) -> Verdict {
    let report = match outcome {
        AuditOutcome::RegistryError { code, summary } => {
            return Verdict {
                exit: ExitStatus::RegistryError,
                output: format!("{code}: {summary}\n"),
            };
        }
        AuditOutcome::Report(report) => report,
    };

    if report.advisories.is_empty() {
        return if policy.json_output {
            Verdict {
                exit: ExitStatus::Pass,
                output: render_json(report.raw_with_empty_collections()),
            }
        } else {
            Verdict {
                exit: ExitStatus::Pass,
                output: "No vulnerabilities found.\n".to_string(),
            }
        };
    }

    let survivors = filter_advisories(report, policy);
    tracing::debug!(
        total = report.advisories.len(),
        surviving = survivors.len(),
        "filter pipeline finished"
    );

    if policy.json_output {
        return Verdict {
            exit: ExitStatus::Pass,
            output: render_json(report.raw_with_advisories(&survivors)),
        };
    }

    if survivors.is_empty() {
        return Verdict {
            exit: ExitStatus::Pass,
            output: String::new(),
        };
    }

    Verdict {
        exit: ExitStatus::VulnerabilitiesFound,
        output: render_listing(&survivors, policy),
    }
}

/// Pretty-printed document with a trailing newline.
fn render_json(doc: Value) -> String {
    // Serializing a `Value` cannot fail; the fallback is unreachable.
    let mut text = serde_json::to_string_pretty(&doc).unwrap_or_default();
    text.push('\n');
    text
}

/// Header sentence plus one aligned `module@version | severity | url` row
/// per surviving advisory.
fn render_listing(survivors: &[&Advisory], policy: &Policy) -> String {
    let scope = if policy.ignore_dev { "production " } else { "" };
    let mut out = format!(
        "The following {scope}vulnerabilities are {} severity or higher:\n",
        policy.threshold
    );

    let rows: Vec<(String, &str, String)> = survivors
        .iter()
        .map(|a| {
            (
                format!("{}@{}", a.module_name, a.first_finding().version),
                a.severity.as_str(),
                a.reference_url(),
            )
        })
        .collect();

    let module_width = rows.iter().map(|(m, _, _)| m.len()).max().unwrap_or(0);
    let severity_width = rows.iter().map(|(_, s, _)| s.len()).max().unwrap_or(0);
    for (module, severity, url) in rows {
        out.push_str(&format!(
            "  {module:<module_width$} | {severity:<severity_width$} | {url}\n"
        ));
    }
    out
}
