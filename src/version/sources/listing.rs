//! Directory-listing strategy: versions scraped from a flat HTTP index
//!
//! Works for repository servers that expose `group-path/artifact/` as an
//! HTML-like listing of version directories. A heuristic of last resort; it
//! will not work everywhere.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::dependency::Coordinate;
use crate::repository::RepositoryDescriptor;
use crate::version::error::SourceError;
use crate::version::ordering::VersionOrdering;
use crate::version::source::VersionSource;
use crate::version::types::VersionSet;

// Hyperlink targets that start with a digit and end with a path separator
// are taken to be version directories.
static VERSION_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href="([0-9][^"]*/)""#).unwrap());

pub struct ListingSource {
    client: reqwest::Client,
    repository: RepositoryDescriptor,
    ordering: VersionOrdering,
}

impl ListingSource {
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

fn extract_versions(listing: &str) -> Vec<String> {
    VERSION_LINK
        .captures_iter(listing)
        .map(|c| c[1].trim_end_matches('/').to_string())
        .collect()
}

#[async_trait::async_trait]
impl VersionSource for ListingSource {
    fn source_id(&self) -> &str {
        &self.repository.id
    }

    async fn fetch_versions(&self, coordinate: &Coordinate) -> Result<VersionSet, SourceError> {
        let url = self.repository.listing_url(coordinate);

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
