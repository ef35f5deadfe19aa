//! Error types for audit report ingestion.

use thiserror::Error;

/// Result type alias for report parsing.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Failures while decoding an audit report.
///
/// Every variant is fatal for the run: a report we cannot decode is a broken
/// pipeline, never "zero vulnerabilities". Nothing here is retried.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The audit output was not valid JSON at all.
    #[error("audit output is not valid JSON: {source}")]
    Json { source: serde_json::Error },

    /// Valid JSON, but neither an `advisories` collection nor an `error`
    /// member is present.
    #[error("audit report has no advisories field and no error field")]
    MissingAdvisories,

    /// An advisory entry could not be decoded into the expected shape.
    #[error("advisory {id} is malformed: {reason}")]
    AdvisoryShape { id: String, reason: String },
}

/// Rejection for a severity name outside the four known levels.
///
/// Surfaced by the CLI layer as a usage error before classification runs.
#[derive(Debug, Error)]
#[error("invalid severity '{0}': expected one of low, moderate, high, critical")]
pub struct InvalidSeverity(pub String);
