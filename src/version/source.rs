//! Source trait for fetching artifact versions from one repository

#[cfg(test)]
use mockall::automock;

use crate::dependency::Coordinate;
use crate::version::error::SourceError;
use crate::version::types::VersionSet;

/// Trait for answering "what versions of this coordinate exist" against one
/// configured source
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Stable id of the repository this source answers for
    fn source_id(&self) -> &str;

    /// Fetches the versions available for a coordinate
    ///
    /// # Returns
    /// * `Ok(VersionSet)` - Sorted versions plus the source's latest; may be
    ///   empty when the source knows nothing about the coordinate
    /// * `Err(SourceError)` - If the fetch fails
    async fn fetch_versions(&self, coordinate: &Coordinate) -> Result<VersionSet, SourceError>;
}
