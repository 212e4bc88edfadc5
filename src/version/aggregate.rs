//! Per-coordinate aggregation of local and remote lookup results

use std::collections::BTreeMap;
use std::path::Path;

use crate::dependency::Coordinate;
use crate::repository::{LOCAL_REPOSITORY_ID, RepositoryRegistry};
use crate::version::ordering::VersionOrdering;
use crate::version::types::VersionSet;

/// Everything the lookup pass learned about one coordinate: the per-source
/// version sets, their de-duplicated union, and the winning latest.
///
/// The winner is the maximum over each source's own latest, not the maximum
/// of the union. Sources may disagree about their latest, and each one is
/// trusted about itself. The full union is exposed separately.
#[derive(Debug, Clone, Default)]
pub struct ResolvedVersions {
    by_source: BTreeMap<String, VersionSet>,
    merged: Vec<String>,
    latest: Option<String>,
}

impl ResolvedVersions {
    /// Merges the local scan result with the remote fan-out results. The
    /// input map is keyed by source id, so merge order never affects the
    /// outcome.
    pub fn merge(
        local: Option<VersionSet>,
        remote: BTreeMap<String, VersionSet>,
        ordering: VersionOrdering,
    ) -> Self {
        let mut by_source = remote;
        if let Some(local) = local
            && !local.is_empty()
        {
            by_source.insert(LOCAL_REPOSITORY_ID.to_string(), local);
        }

        let mut merged: Vec<String> = by_source
            .values()
            .flat_map(|set| set.versions().iter().cloned())
            .collect();
        ordering.sort(&mut merged);
        merged.dedup();

        let latest = ordering
            .max(by_source.values().filter_map(|set| set.latest()))
            .map(str::to_string);

        Self {
            by_source,
            merged,
            latest,
        }
    }

    /// True when no source had any version: the "no versions found in any
    /// repository" outcome. Reportable, never an error.
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    pub fn by_source(&self) -> &BTreeMap<String, VersionSet> {
        &self.by_source
    }

    pub fn source(&self, id: &str) -> Option<&VersionSet> {
        self.by_source.get(id)
    }

    /// Unique union of every source's versions, sorted
    pub fn merged(&self) -> &[String] {
        &self.merged
    }

    /// Latest version across all sources
    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    /// Id of the source whose self-reported latest won, preferring the
    /// registry's display order when several agree.
    pub fn latest_source<'a>(&'a self, registry: &'a RepositoryRegistry) -> Option<&'a str> {
        let latest = self.latest.as_deref()?;
        registry
            .remotes()
            .map(|r| r.id.as_str())
            .chain(std::iter::once(LOCAL_REPOSITORY_ID))
            .find(|id| {
                self.by_source
                    .get(*id)
                    .is_some_and(|set| set.latest() == Some(latest))
            })
    }

    /// Renderable per-source rows, local first, then registry display
    /// order. Feeds presentation only.
    pub fn breakdown(
        &self,
        registry: &RepositoryRegistry,
        coordinate: &Coordinate,
        recent_count: usize,
    ) -> Vec<SourceBreakdown> {
        let mut rows = Vec::new();

        if let Some(set) = self.by_source.get(LOCAL_REPOSITORY_ID)
            && let Some(local) = registry.local()
            && let Some(latest) = set.latest()
        {
            rows.push(SourceBreakdown {
                id: local.id.clone(),
                label: local.name.clone(),
                version_count: set.len(),
                latest: latest.to_string(),
                recent: set.recent(recent_count).to_vec(),
                location: Path::new(&local.url)
                    .join(coordinate.group_path())
                    .join(&coordinate.artifact_id)
                    .join(latest)
                    .display()
                    .to_string(),
            });
        }

        for repository in registry.remotes() {
            let Some(set) = self.by_source.get(&repository.id) else {
                continue;
            };
            let Some(latest) = set.latest() else {
                continue;
            };
            rows.push(SourceBreakdown {
                id: repository.id.clone(),
                label: repository.name.clone(),
                version_count: set.len(),
                latest: latest.to_string(),
                recent: set.recent(recent_count).to_vec(),
                location: repository.artifact_url(coordinate, latest),
            });
        }

        rows
    }
}

/// One source's row in the per-coordinate report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBreakdown {
    pub id: String,
    pub label: String,
    pub version_count: usize,
    pub latest: String,
    /// Most recent versions, oldest first
    pub recent: Vec<String>,
    /// Artifact URL for remotes, filesystem path for the local cache
    pub location: String,
}
