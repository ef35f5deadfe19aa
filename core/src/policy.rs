//! The user-supplied policy a run is classified against.

use crate::severity::Severity;
use crate::whitelist::WhitelistEntry;

/// Policy inputs, immutable for the run.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Minimum severity that fails the build.
    pub threshold: Severity,
    /// Drop advisories that only apply through dev dependencies.
    pub ignore_dev: bool,
    /// Parsed whitelist exceptions, checked in order.
    pub whitelist: Vec<WhitelistEntry>,
    /// Emit the filtered document instead of a pass/fail listing.
    pub json_output: bool,
}

impl Policy {
    /// Policy with the given threshold and everything else off. Tests and
    /// callers enable the flags they care about.
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            ignore_dev: false,
            whitelist: Vec::new(),
            json_output: false,
        }
    }
}
