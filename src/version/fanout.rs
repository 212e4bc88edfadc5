//! Bounded concurrent fan-out over remote version sources
//!
//! One lookup task per configured source, at most
//! [`config::MAX_CONCURRENT_LOOKUPS`] in flight, each bounded by the
//! collection timeout. Partial success is the expected failure mode: tasks
//! that time out, error, or come back empty are dropped and the rest of the
//! lookup proceeds. A task that outlives its budget is abandoned, not
//! killed; the HTTP client's own timeouts wind it down.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::config;
use crate::dependency::Coordinate;
use crate::version::source::VersionSource;
use crate::version::types::VersionSet;

/// Looks up one coordinate against every source concurrently and collects
/// whatever completes within the timeout into a per-source-id map. An empty
/// map is a valid result: zero reachable sources.
pub async fn fetch_all(
    sources: &[Arc<dyn VersionSource>],
    coordinate: &Coordinate,
    timeout: Duration,
) -> BTreeMap<String, VersionSet> {
    if sources.is_empty() {
        return BTreeMap::new();
    }

    let pool = sources.len().min(config::MAX_CONCURRENT_LOOKUPS);

    stream::iter(sources.iter().map(|source| {
        let source = Arc::clone(source);
        async move {
            let id = source.source_id().to_string();
            match tokio::time::timeout(timeout, source.fetch_versions(coordinate)).await {
                Ok(Ok(set)) if !set.is_empty() => Some((id, set)),
                Ok(Ok(_)) => {
                    debug!("{}: no versions for {}", id, coordinate);
                    None
                }
                Ok(Err(e)) => {
                    debug!("{}: lookup failed for {}: {}", id, coordinate, e);
                    None
                }
                Err(_) => {
                    warn!(
                        "{}: lookup for {} exceeded {:?}, abandoning",
                        id, coordinate, timeout
                    );
                    None
                }
            }
        }
    }))
    .buffer_unordered(pool)
    .filter_map(|result| async move { result })
    .collect()
    .await
}
