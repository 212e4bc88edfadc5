//! Version lists reported by a single source

use crate::version::ordering::VersionOrdering;

/// The versions one source reported for one coordinate, sorted ascending,
/// plus that source's own idea of the latest version.
///
/// Computed fresh on every lookup; never cached across calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionSet {
    versions: Vec<String>,
    latest: Option<String>,
}

impl VersionSet {
    /// A set with no versions and no latest
    pub fn empty() -> Self {
        Self {
            versions: Vec::new(),
            latest: None,
        }
    }

    /// Sorts the versions under the given policy and derives the latest as
    /// the maximum (the last element after sorting).
    pub fn from_unsorted(mut versions: Vec<String>, ordering: VersionOrdering) -> Self {
        ordering.sort(&mut versions);
        let latest = versions.last().cloned();
        Self { versions, latest }
    }

    /// Sorts the versions but keeps the source's self-reported latest
    /// instead of deriving one. Used where the source names its latest
    /// explicitly (search-index results).
    pub fn with_reported_latest(
        mut versions: Vec<String>,
        latest: impl Into<String>,
        ordering: VersionOrdering,
    ) -> Self {
        ordering.sort(&mut versions);
        Self {
            versions,
            latest: Some(latest.into()),
        }
    }

    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// The most recent `count` versions (the tail of the sorted list).
    pub fn recent(&self, count: usize) -> &[String] {
        let start = self.versions.len().saturating_sub(count);
        &self.versions[start..]
    }
}
