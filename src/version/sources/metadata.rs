//! Structured-metadata strategy: versions from `maven-metadata.xml`

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::dependency::Coordinate;
use crate::repository::RepositoryDescriptor;
use crate::version::error::SourceError;
use crate::version::ordering::VersionOrdering;
use crate::version::source::VersionSource;
use crate::version::types::VersionSet;

static VERSIONS_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<versions>(.*?)</versions>").unwrap());
static VERSION_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<version>([^<]*)</version>").unwrap());
static RELEASE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<release>([^<]*)</release>").unwrap());
static LATEST_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<latest>([^<]*)</latest>").unwrap());

/// Fetches `base/group-path/artifact/maven-metadata.xml` and pulls every
/// version entry out of it.
pub struct MetadataSource {
    client: reqwest::Client,
    repository: RepositoryDescriptor,
    ordering: VersionOrdering,
}

impl MetadataSource {
    pub fn new(
        client: reqwest::Client,
        repository: RepositoryDescriptor,
        ordering: VersionOrdering,
    ) -> Self {
        Self {
            client,
            repository,
            ordering,
        }
    }
}

/// Extract version strings from a metadata document. All `<version>`
/// entries inside the `<versions>` block; when there are none, the
/// document's `<release>` and `<latest>` fields serve as a last resort.
/// Malformed documents simply yield nothing.
fn extract_versions(metadata: &str) -> Vec<String> {
    let mut versions: Vec<String> = VERSIONS_BLOCK
        .captures(metadata)
        .map(|block| {
            VERSION_ENTRY
                .captures_iter(block.get(1).map_or("", |m| m.as_str()))
                .map(|c| c[1].to_string())
                .collect()
        })
        .unwrap_or_default();

    if versions.is_empty() {
        if let Some(release) = RELEASE_TAG.captures(metadata) {
            versions.push(release[1].trim().to_string());
        }
        if let Some(latest) = LATEST_TAG.captures(metadata) {
            let latest = latest[1].trim().to_string();
            if !versions.contains(&latest) {
                versions.push(latest);
            }
        }
    }

    versions
}

#[async_trait::async_trait]
impl VersionSource for MetadataSource {
    fn source_id(&self) -> &str {
        &self.repository.id
    }

    async fn fetch_versions(&self, coordinate: &Coordinate) -> Result<VersionSet, SourceError> {
        let url = self.repository.metadata_url(coordinate);

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(coordinate.to_string()));
        }

        if !status.is_success() {
            warn!("{} returned status {}: {}", self.repository.id, status, url);
            return Err(SourceError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;

        Ok(VersionSet::from_unsorted(
            extract_versions(&body),
            self.ordering,
        ))
    }
}
