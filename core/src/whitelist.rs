//! User-declared exceptions that suppress specific advisories.
//!
//! Entries arrive as raw CLI strings and are parsed once into
//! `(module, version constraint)` pairs; matching is plain string equality,
//! no semver interpretation.

use crate::report::Advisory;

/// A single whitelist exception.
///
/// Accepted forms: `module` (any version), `module:*` (explicit any-version
/// wildcard), `module:version` (that exact version only).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistEntry {
    pub module: String,
    pub version: VersionMatch,
}

/// Version constraint of a whitelist entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionMatch {
    /// Matches any version.
    Any,
    /// Matches exactly this version string.
    Exact(String),
}

impl WhitelistEntry {
    /// Parse a raw entry. The text before the first `:` is the module name;
    /// everything after it is the version constraint.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(':') {
            None => Self {
                module: raw.to_string(),
                version: VersionMatch::Any,
            },
            Some((module, "*")) => Self {
                module: module.to_string(),
                version: VersionMatch::Any,
            },
            Some((module, version)) => Self {
                module: module.to_string(),
                version: VersionMatch::Exact(version.to_string()),
            },
        }
    }

    /// Whether this entry suppresses the given advisory. The module name is
    /// compared against the name embedded in the advisory record; an exact
    /// version constraint is compared against the first finding's version.
    pub fn matches(&self, advisory: &Advisory) -> bool {
        if self.module != advisory.module_name {
            return false;
        }
        match &self.version {
            VersionMatch::Any => true,
            VersionMatch::Exact(version) => *version == advisory.first_finding().version,
        }
    }
}
