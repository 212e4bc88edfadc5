//! One remote repository as a version source, with ordered strategy fallback

use tracing::debug;

use crate::dependency::Coordinate;
use crate::repository::RepositoryDescriptor;
use crate::version::error::SourceError;
use crate::version::ordering::VersionOrdering;
use crate::version::source::VersionSource;
use crate::version::sources::listing::ListingSource;
use crate::version::sources::metadata::MetadataSource;
use crate::version::sources::search::SearchSource;
use crate::version::types::VersionSet;

/// Tries each strategy for one repository in order: metadata document,
/// then the search index (where the repository has one), then the raw
/// directory listing. Answers with the first non-empty result.
///
/// A strategy that fails or comes back empty just hands over to the next
/// one; an exhausted chain answers with an empty set rather than an error.
pub struct RemoteRepositorySource {
    id: String,
    strategies: Vec<Box<dyn VersionSource>>,
}

impl RemoteRepositorySource {
    pub fn new(
        client: &reqwest::Client,
        repository: &RepositoryDescriptor,
        ordering: VersionOrdering,
    ) -> Self {
        let mut strategies: Vec<Box<dyn VersionSource>> = vec![Box::new(MetadataSource::new(
            client.clone(),
            repository.clone(),
            ordering,
        ))];
        if let Some(search_url) = &repository.search_url {
            strategies.push(Box::new(SearchSource::new(
                client.clone(),
                search_url,
                &repository.id,
                ordering,
            )));
        }
        strategies.push(Box::new(ListingSource::new(
            client.clone(),
            repository.clone(),
            ordering,
        )));

        Self {
            id: repository.id.clone(),
            strategies,
        }
    }

    #[cfg(test)]
    fn from_strategies(id: &str, strategies: Vec<Box<dyn VersionSource>>) -> Self {
        Self {
            id: id.to_string(),
            strategies,
        }
    }
}

#[async_trait::async_trait]
impl VersionSource for RemoteRepositorySource {
    fn source_id(&self) -> &str {
        &self.id
    }

    async fn fetch_versions(&self, coordinate: &Coordinate) -> Result<VersionSet, SourceError> {
        for strategy in &self.strategies {
            match strategy.fetch_versions(coordinate).await {
                Ok(set) if !set.is_empty() => return Ok(set),
                Ok(_) => {
                    debug!("{}: strategy found no versions for {}", self.id, coordinate);
                }
                Err(e) => {
                    debug!("{}: strategy failed for {}: {}", self.id, coordinate, e);
                }
            }
        }
        Ok(VersionSet::empty())
    }
}
