//! The enrichment pipeline: one lookup pass per dependency record

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::config;
use crate::dependency::{Coordinate, Dependency};
use crate::repository::{LOCAL_REPOSITORY_ID, RepositoryRegistry};
use crate::version::aggregate::ResolvedVersions;
use crate::version::fanout;
use crate::version::local;
use crate::version::ordering::VersionOrdering;
use crate::version::source::VersionSource;
use crate::version::sources::RemoteRepositorySource;
use crate::version::types::VersionSet;

/// What one enrichment pass did for one record
#[derive(Debug, Clone)]
pub enum LookupOutcome {
    /// Declared version absent or a property placeholder; no lookup was
    /// performed and the record is unchanged
    Skipped,
    /// Every configured source came up empty. Reportable, not an error.
    NoVersionsFound,
    /// At least one source answered
    Resolved(ResolvedVersions),
}

/// Resolves versions for dependency coordinates across the configured
/// repositories and annotates the records with what it finds.
///
/// The repository set is fixed at construction and read-only during a
/// lookup pass. Results are computed fresh on every call; nothing is
/// cached here.
pub struct VersionChecker {
    registry: RepositoryRegistry,
    client: reqwest::Client,
    ordering: VersionOrdering,
    collect_timeout: Duration,
}

impl VersionChecker {
    pub fn new(registry: RepositoryRegistry) -> Self {
        Self {
            registry,
            client: reqwest::Client::builder()
                .user_agent("version-scout")
                .connect_timeout(Duration::from_secs(config::CONNECT_TIMEOUT_SECS))
                .timeout(Duration::from_secs(config::REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client"),
            ordering: VersionOrdering::default(),
            collect_timeout: Duration::from_secs(config::COLLECT_TIMEOUT_SECS),
        }
    }

    pub fn with_ordering(mut self, ordering: VersionOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_collect_timeout(mut self, timeout: Duration) -> Self {
        self.collect_timeout = timeout;
        self
    }

    pub fn registry(&self) -> &RepositoryRegistry {
        &self.registry
    }

    pub fn ordering(&self) -> VersionOrdering {
        self.ordering
    }

    /// Looks up one coordinate across the local cache and every remote
    /// repository concurrently and merges the results.
    pub async fn resolve_versions(
        &self,
        coordinate: &Coordinate,
        extension: &str,
    ) -> ResolvedVersions {
        let sources: Vec<Arc<dyn VersionSource>> = self
            .registry
            .remotes()
            .map(|repository| {
                Arc::new(RemoteRepositorySource::new(
                    &self.client,
                    repository,
                    self.ordering,
                )) as Arc<dyn VersionSource>
            })
            .collect();

        let local_scan = self.registry.local().map(|descriptor| {
            let root = PathBuf::from(&descriptor.url);
            let coordinate = coordinate.clone();
            let extension = extension.to_string();
            let ordering = self.ordering;
            tokio::task::spawn_blocking(move || {
                VersionSet::from_unsorted(
                    local::scan_versions(&root, &coordinate, &extension),
                    ordering,
                )
            })
        });

        let remote_lookup = fanout::fetch_all(&sources, coordinate, self.collect_timeout);

        let (local, remote) = match local_scan {
            Some(handle) => {
                let (local, remote) = tokio::join!(handle, remote_lookup);
                (local.ok(), remote)
            }
            None => (None, remote_lookup.await),
        };

        ResolvedVersions::merge(local, remote, self.ordering)
    }

    /// Enriches one record in place. Records with an absent or placeholder
    /// version are returned untouched without any lookup.
    pub async fn enrich(&self, dependency: &mut Dependency) -> LookupOutcome {
        if dependency.has_unresolved_version() {
            debug!(
                "Skipping {}: declared version is {:?}",
                dependency.coordinate, dependency.version
            );
            return LookupOutcome::Skipped;
        }

        let resolved = self
            .resolve_versions(&dependency.coordinate, dependency.extension())
            .await;

        if resolved.is_empty() {
            info!(
                "No versions found in any repository for {}",
                dependency.coordinate
            );
            return LookupOutcome::NoVersionsFound;
        }

        dependency.available_versions = resolved.merged().to_vec();
        dependency.set_latest_version(resolved.latest().map(str::to_string));

        if resolved.source(LOCAL_REPOSITORY_ID).is_some()
            && let Some(local) = self.registry.local()
            && let Some(declared) = dependency.version.as_deref()
        {
            dependency.local_path = Some(
                Path::new(&local.url)
                    .join(dependency.coordinate.group_path())
                    .join(&dependency.coordinate.artifact_id)
                    .join(declared)
                    .display()
                    .to_string(),
            );
        }

        if let Some(winner) = resolved.latest_source(&self.registry)
            && winner != LOCAL_REPOSITORY_ID
            && let (Some(repository), Some(latest)) =
                (self.registry.get(winner), resolved.latest())
        {
            dependency.repository_url =
                Some(repository.artifact_url(&dependency.coordinate, latest));
        }

        LookupOutcome::Resolved(resolved)
    }

    /// Enriches every record, one coordinate at a time; the concurrency
    /// lives inside each per-coordinate lookup. Returns one outcome per
    /// record, in order.
    pub async fn enrich_all(&self, dependencies: &mut [Dependency]) -> Vec<LookupOutcome> {
        let mut outcomes = Vec::with_capacity(dependencies.len());
        for dependency in dependencies.iter_mut() {
            outcomes.push(self.enrich(dependency).await);
        }
        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryDescriptor;
    use mockito::Server;
    use std::fs::{self, File};
    use tempfile::TempDir;

    const METADATA: &str = r#"<metadata>
        <versioning>
            <versions>
                <version>1.7.36</version>
                <version>2.0.9</version>
            </versions>
        </versioning>
    </metadata>"#;

    fn registry_with_remote(base_url: &str) -> RepositoryRegistry {
        let mut registry = RepositoryRegistry::new();
        registry.add(RepositoryDescriptor::remote("central", "Maven Central", base_url));
        registry
    }

    fn seed_local(root: &TempDir, version: &str) {
        let dir = root.path().join("org/slf4j/slf4j-api").join(version);
        fs::create_dir_all(&dir).unwrap();
        File::create(dir.join(format!("slf4j-api-{version}.jar"))).unwrap();
    }

    #[tokio::test]
    async fn enrich_skips_placeholder_versions_without_any_lookup() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", mockito::Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let checker = VersionChecker::new(registry_with_remote(&server.url()));
        let mut dep = Dependency::new(
            "org.slf4j",
            "slf4j-api",
            Some("${slf4j.version}".to_string()),
        );

        let outcome = checker.enrich(&mut dep).await;

        mock.assert_async().await;
        assert!(matches!(outcome, LookupOutcome::Skipped));
        assert!(dep.available_versions.is_empty());
        assert_eq!(dep.latest_version(), None);
    }

    #[tokio::test]
    async fn enrich_skips_records_without_a_declared_version() {
        let checker = VersionChecker::new(RepositoryRegistry::new());
        let mut dep = Dependency::new("org.slf4j", "slf4j-api", None);

        let outcome = checker.enrich(&mut dep).await;

        assert!(matches!(outcome, LookupOutcome::Skipped));
    }

    #[tokio::test]
    async fn enrich_reports_no_versions_when_every_source_is_empty() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/org/slf4j/slf4j-api/maven-metadata.xml")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/org/slf4j/slf4j-api/")
            .with_status(404)
            .create_async()
            .await;

        let local_root = TempDir::new().unwrap();
        let mut registry = registry_with_remote(&server.url());
        registry.set_local_root(local_root.path().display().to_string());

        let checker = VersionChecker::new(registry);
        let mut dep = Dependency::new("org.slf4j", "slf4j-api", Some("1.7.36".to_string()));

        let outcome = checker.enrich(&mut dep).await;

        assert!(matches!(outcome, LookupOutcome::NoVersionsFound));
        assert!(dep.available_versions.is_empty());
        assert_eq!(dep.latest_version(), None);
        assert!(!dep.is_outdated());
    }

    #[tokio::test]
    async fn enrich_merges_local_and_remote_and_flags_outdated() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/org/slf4j/slf4j-api/maven-metadata.xml")
            .with_status(200)
            .with_body(METADATA)
            .create_async()
            .await;

        let local_root = TempDir::new().unwrap();
        seed_local(&local_root, "1.7.30");
        seed_local(&local_root, "1.7.36");

        let mut registry = registry_with_remote(&server.url());
        registry.set_local_root(local_root.path().display().to_string());

        let checker = VersionChecker::new(registry);
        let mut dep = Dependency::new("org.slf4j", "slf4j-api", Some("1.7.36".to_string()));

        let outcome = checker.enrich(&mut dep).await;

        assert!(matches!(outcome, LookupOutcome::Resolved(_)));
        assert_eq!(dep.available_versions, ["1.7.30", "1.7.36", "2.0.9"]);
        assert_eq!(dep.latest_version(), Some("2.0.9"));
        assert!(dep.is_outdated());
        assert_eq!(
            dep.repository_url.as_deref(),
            Some(format!("{}/org/slf4j/slf4j-api/2.0.9", server.url()).as_str())
        );
        let local_path = dep.local_path.as_deref().unwrap();
        assert!(local_path.ends_with("org/slf4j/slf4j-api/1.7.36"));
    }

    #[tokio::test]
    async fn enrich_leaves_repository_url_unset_when_only_local_answers() {
        let local_root = TempDir::new().unwrap();
        seed_local(&local_root, "1.7.36");

        let mut registry = RepositoryRegistry::new();
        registry.set_local_root(local_root.path().display().to_string());

        let checker = VersionChecker::new(registry);
        let mut dep = Dependency::new("org.slf4j", "slf4j-api", Some("1.7.36".to_string()));

        let outcome = checker.enrich(&mut dep).await;

        assert!(matches!(outcome, LookupOutcome::Resolved(_)));
        assert_eq!(dep.latest_version(), Some("1.7.36"));
        assert!(!dep.is_outdated());
        assert_eq!(dep.repository_url, None);
        assert!(dep.local_path.is_some());
    }

    #[tokio::test]
    async fn enrich_all_returns_one_outcome_per_record_in_order() {
        let local_root = TempDir::new().unwrap();
        seed_local(&local_root, "1.7.36");

        let mut registry = RepositoryRegistry::new();
        registry.set_local_root(local_root.path().display().to_string());

        let checker = VersionChecker::new(registry);
        let mut deps = vec![
            Dependency::new("org.slf4j", "slf4j-api", Some("${v}".to_string())),
            Dependency::new("org.slf4j", "slf4j-api", Some("1.7.36".to_string())),
            Dependency::new("com.example", "absent", Some("1.0".to_string())),
        ];

        let outcomes = checker.enrich_all(&mut deps).await;

        assert!(matches!(outcomes[0], LookupOutcome::Skipped));
        assert!(matches!(outcomes[1], LookupOutcome::Resolved(_)));
        assert!(matches!(outcomes[2], LookupOutcome::NoVersionsFound));
    }
}
