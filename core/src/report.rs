//! Audit report ingestion and normalization.
//!
//! The report arrives as one JSON document from `npm audit --json`. Two
//! shapes are possible and mutually exclusive: a normal report carrying an
//! `advisories` collection, or a registry-communication failure carrying an
//! `error` member. [`parse_report`] resolves that split into the
//! [`AuditOutcome`] sum type so nothing downstream can reach advisories
//! without handling the error case first.
//!
//! Findings are heterogeneous in the wild: newer npm versions attach a `dev`
//! boolean directly, older ones only give dependency paths that have to be
//! cross-referenced with the remediation actions. Both shapes are resolved
//! here, once, into a [`Finding`] with a guaranteed dev flag so the filter
//! stages never branch on shape.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::ADVISORY_URL_BASE;
use crate::error::{ReportError, Result};
use crate::severity::Severity;

/// Outcome of parsing the audit document.
#[derive(Debug, Clone)]
pub enum AuditOutcome {
    /// A normal report with zero or more advisories.
    Report(AuditReport),
    /// The audit service could not be reached; no advisory data exists.
    RegistryError { code: String, summary: String },
}

/// A parsed audit report.
///
/// Keeps the original document verbatim alongside the typed advisory list:
/// JSON-mode output re-emits the document with only the advisory collection
/// replaced, so every field we do not model must survive untouched.
#[derive(Debug, Clone)]
pub struct AuditReport {
    raw: Value,
    /// Advisories in document order.
    pub advisories: Vec<Advisory>,
}

impl AuditReport {
    /// The original document with `advisories`, `actions`, and `muted`
    /// normalized to empty collections. Used for the zero-advisory JSON path.
    pub fn raw_with_empty_collections(&self) -> Value {
        let mut doc = self.raw.clone();
        if let Value::Object(map) = &mut doc {
            map.insert("advisories".to_string(), Value::Object(Default::default()));
            map.insert("actions".to_string(), Value::Array(Vec::new()));
            map.insert("muted".to_string(), Value::Array(Vec::new()));
        }
        doc
    }

    /// The original document with the advisory collection replaced by the
    /// given advisories as an ordered `[id, advisory]` sequence, not re-keyed
    /// by identifier.
    pub fn raw_with_advisories(&self, advisories: &[&Advisory]) -> Value {
        let entries: Vec<Value> = advisories
            .iter()
            .map(|a| Value::Array(vec![Value::String(a.id.clone()), a.raw.clone()]))
            .collect();
        let mut doc = self.raw.clone();
        if let Value::Object(map) = &mut doc {
            map.insert("advisories".to_string(), Value::Array(entries));
        }
        doc
    }
}

/// One reported vulnerability affecting one module.
#[derive(Debug, Clone)]
pub struct Advisory {
    /// Unique identifier: the advisory's key in the source document.
    pub id: String,
    /// Module name as embedded in the advisory record (whitelist matching
    /// compares against this, never the map key).
    pub module_name: String,
    pub severity: Severity,
    /// Normalized findings, never empty.
    pub findings: Vec<Finding>,
    raw: Value,
}

impl Advisory {
    /// Reference URL shown in the failure listing.
    pub fn reference_url(&self) -> String {
        format!("{ADVISORY_URL_BASE}{}", self.id)
    }

    /// The first finding. Ingestion rejects advisories with an empty
    /// findings list, so this cannot panic.
    pub fn first_finding(&self) -> &Finding {
        &self.findings[0]
    }
}

/// One concrete occurrence of a vulnerable dependency, with its dev scope
/// already resolved.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Resolved version of the vulnerable module.
    pub version: String,
    /// Whether this occurrence exists only through dev dependencies.
    pub dev: bool,
    /// Dependency paths (`>`-separated ancestor chains), root-most first.
    pub paths: Vec<String>,
}

/// A remediation action from the report, reduced to the one fact the
/// classifier needs: whether the module it targets resolves through dev
/// dependencies.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub module: String,
    pub dev: bool,
}

#[derive(Debug, Deserialize)]
struct RawError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    summary: String,
}

#[derive(Debug, Deserialize)]
struct RawAdvisory {
    module_name: String,
    severity: Severity,
    findings: Vec<RawFinding>,
}

#[derive(Debug, Deserialize)]
struct RawFinding {
    version: String,
    #[serde(default)]
    dev: Option<bool>,
    #[serde(default)]
    paths: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawAction {
    module: String,
    #[serde(default)]
    resolves: Vec<RawResolve>,
}

#[derive(Debug, Deserialize)]
struct RawResolve {
    #[serde(default)]
    dev: bool,
}

/// Parse the audit document.
///
/// An `error` member takes precedence over everything else. Otherwise the
/// document must carry an `advisories` object; a report with neither is
/// malformed and surfaced as an error, never treated as zero
/// vulnerabilities.
pub fn parse_report(text: &str) -> Result<AuditOutcome> {
    let doc: Value = serde_json::from_str(text).map_err(|source| ReportError::Json { source })?;

    if let Some(err) = doc.get("error") {
        let raw: RawError = serde_json::from_value(err.clone()).unwrap_or(RawError {
            code: String::new(),
            summary: String::new(),
        });
        return Ok(AuditOutcome::RegistryError {
            code: raw.code,
            summary: raw.summary,
        });
    }

    let Some(Value::Object(entries)) = doc.get("advisories") else {
        return Err(ReportError::MissingAdvisories);
    };

    let actions = parse_actions(&doc);
    let dev_modules: HashMap<&str, bool> = actions
        .iter()
        .map(|a| (a.module.as_str(), a.dev))
        .collect();

    let mut advisories = Vec::with_capacity(entries.len());
    for (id, value) in entries {
        let raw: RawAdvisory =
            serde_json::from_value(value.clone()).map_err(|e| ReportError::AdvisoryShape {
                id: id.clone(),
                reason: e.to_string(),
            })?;
        if raw.findings.is_empty() {
            return Err(ReportError::AdvisoryShape {
                id: id.clone(),
                reason: "findings list is empty".to_string(),
            });
        }
        let findings = raw
            .findings
            .into_iter()
            .map(|f| normalize_finding(f, &dev_modules))
            .collect();
        advisories.push(Advisory {
            id: id.clone(),
            module_name: raw.module_name,
            severity: raw.severity,
            findings,
            raw: value.clone(),
        });
    }

    tracing::debug!(advisories = advisories.len(), "parsed audit report");
    Ok(AuditOutcome::Report(AuditReport {
        raw: doc,
        advisories,
    }))
}

/// Remediation actions, reduced to module-level dev booleans. An action is
/// dev-scoped when any of its resolution paths is flagged dev.
fn parse_actions(doc: &Value) -> Vec<ActionRecord> {
    let Some(Value::Array(actions)) = doc.get("actions") else {
        return Vec::new();
    };
    actions
        .iter()
        .filter_map(|a| serde_json::from_value::<RawAction>(a.clone()).ok())
        .map(|a| ActionRecord {
            dev: a.resolves.iter().any(|r| r.dev),
            module: a.module,
        })
        .collect()
}

/// Resolve a finding's dev scope.
///
/// The direct flag always wins. Without it, the finding is dev-scoped iff it
/// has at least one dependency path and the root-most ancestor of every path
/// is marked dev by the actions. An ancestor the actions do not mention
/// counts as non-dev, which keeps the advisory in scope.
fn normalize_finding(raw: RawFinding, dev_modules: &HashMap<&str, bool>) -> Finding {
    let dev = match raw.dev {
        Some(flag) => flag,
        None => {
            !raw.paths.is_empty()
                && raw.paths.iter().all(|path| {
                    let root = path.split('>').next().unwrap_or(path.as_str());
                    dev_modules.get(root).copied().unwrap_or(false)
                })
        }
    };
    Finding {
        version: raw.version,
        dev,
        paths: raw.paths,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn report_with(advisory: Value, actions: Value) -> AuditReport {
        let doc = json!({
            "actions": actions,
            "advisories": { "100": advisory },
            "muted": [],
        });
        match parse_report(&doc.to_string()) {
            Ok(AuditOutcome::Report(report)) => report,
            other => panic!("expected report, got {other:?}"),
        }
    }

    #[test]
    fn direct_dev_flag_wins_over_paths() {
        // Paths point at a dev-flagged ancestor, but the direct flag says
        // production; the flag must win.
        let report = report_with(
            json!({
                "module_name": "lodash",
                "severity": "high",
                "findings": [{ "version": "4.17.11", "dev": false, "paths": ["mocha>lodash"] }],
            }),
            json!([{ "module": "mocha", "resolves": [{ "dev": true }] }]),
        );
        assert!(!report.advisories[0].first_finding().dev);
    }

    #[test]
    fn derives_dev_when_every_path_roots_in_dev_module() {
        let report = report_with(
            json!({
                "module_name": "growl",
                "severity": "critical",
                "findings": [{ "version": "1.9.2", "paths": ["mocha>growl", "karma>growl"] }],
            }),
            json!([
                { "module": "mocha", "resolves": [{ "dev": true }] },
                { "module": "karma", "resolves": [{ "dev": true }] },
            ]),
        );
        assert!(report.advisories[0].first_finding().dev);
    }

    #[test]
    fn one_production_path_keeps_finding_in_scope() {
        let report = report_with(
            json!({
                "module_name": "debug",
                "severity": "low",
                "findings": [{ "version": "2.6.8", "paths": ["mocha>debug", "express>debug"] }],
            }),
            json!([
                { "module": "mocha", "resolves": [{ "dev": true }] },
                { "module": "express", "resolves": [{ "dev": false }] },
            ]),
        );
        assert!(!report.advisories[0].first_finding().dev);
    }

    #[test]
    fn unknown_ancestor_counts_as_production() {
        let report = report_with(
            json!({
                "module_name": "merge",
                "severity": "low",
                "findings": [{ "version": "1.2.0", "paths": ["grunt>merge"] }],
            }),
            json!([]),
        );
        assert!(!report.advisories[0].first_finding().dev);
    }

    #[test]
    fn no_flag_and_no_paths_is_production() {
        let report = report_with(
            json!({
                "module_name": "handlebars",
                "severity": "high",
                "findings": [{ "version": "4.0.11" }],
            }),
            json!([]),
        );
        assert!(!report.advisories[0].first_finding().dev);
    }

    #[test]
    fn error_member_takes_precedence() {
        let doc = json!({
            "error": { "code": "ENOTFOUND", "summary": "getaddrinfo ENOTFOUND registry.npmjs.org" },
            "advisories": {},
        });
        match parse_report(&doc.to_string()) {
            Ok(AuditOutcome::RegistryError { code, summary }) => {
                assert_eq!(code, "ENOTFOUND");
                assert!(summary.contains("registry.npmjs.org"));
            }
            other => panic!("expected registry error, got {other:?}"),
        }
    }

    #[test]
    fn missing_advisories_is_an_error() {
        let err = parse_report(r#"{ "metadata": {} }"#).expect_err("must not parse");
        assert!(matches!(err, ReportError::MissingAdvisories));
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_report("not json"),
            Err(ReportError::Json { .. })
        ));
    }

    #[test]
    fn empty_findings_list_is_malformed() {
        let doc = json!({
            "advisories": {
                "42": { "module_name": "left-pad", "severity": "low", "findings": [] }
            }
        });
        let err = parse_report(&doc.to_string()).expect_err("must not parse");
        assert!(matches!(err, ReportError::AdvisoryShape { ref id, .. } if id == "42"));
    }

    #[test]
    fn reference_url_appends_identifier() {
        let report = report_with(
            json!({
                "module_name": "growl",
                "severity": "critical",
                "findings": [{ "version": "1.9.2", "dev": true }],
            }),
            json!([]),
        );
        assert_eq!(
            report.advisories[0].reference_url(),
            "https://www.npmjs.com/advisories/100"
        );
    }
}
