//! Version ordering policies
//!
//! The default policy is plain lexicographic string ordering: it is how this
//! tool has always ranked repository version lists, and downstream output
//! depends on it ("1.9" sorts after "1.10"). The semantic policy is a
//! separately named opt-in for callers that want numeric-aware ranking; it
//! never replaces the default.

use std::cmp::Ordering;

use semver::Version;

/// How version strings are compared when sorting and picking a latest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VersionOrdering {
    /// Plain string comparison; "1.9" ranks above "1.10"
    #[default]
    Lexicographic,
    /// Semver-aware comparison; unparseable versions rank below parseable
    /// ones and fall back to string comparison among themselves
    Semantic,
}

impl VersionOrdering {
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            VersionOrdering::Lexicographic => a.cmp(b),
            VersionOrdering::Semantic => match (parse_version(a), parse_version(b)) {
                (Some(va), Some(vb)) => va.cmp(&vb),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => a.cmp(b),
            },
        }
    }

    /// Sorts versions ascending; the last element is the latest.
    pub fn sort(&self, versions: &mut [String]) {
        versions.sort_by(|a, b| self.compare(a, b));
    }

    /// The maximum of an iterator of version strings under this policy.
    pub fn max<'a>(&self, versions: impl Iterator<Item = &'a str>) -> Option<&'a str> {
        versions.max_by(|a, b| self.compare(a, b))
    }
}

/// Parse a version string into a semver::Version, padding partial versions
/// with zeros ("1" -> 1.0.0, "1.2" -> 1.2.0).
fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}
