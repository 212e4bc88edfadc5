//! Constants and defaults for repository lookups

use std::path::PathBuf;

// =============================================================================
// Time-related constants
// =============================================================================

/// Per-source collection budget: a lookup task that has not produced a
/// result within this window is abandoned (15 seconds)
pub const COLLECT_TIMEOUT_SECS: u64 = 15;

/// HTTP connect timeout (10 seconds); strictly shorter than the collection
/// budget so abandoned tasks wind down on their own
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP per-request timeout (10 seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Lookup sizing
// =============================================================================

/// Upper bound on concurrent repository lookups per coordinate
pub const MAX_CONCURRENT_LOOKUPS: usize = 10;

/// Number of most-recent versions shown per source in the report
pub const RECENT_DISPLAY_COUNT: usize = 5;

/// Maximum rows requested from the search index
pub const SEARCH_ROWS: usize = 20;

// =============================================================================
// Well-known endpoints
// =============================================================================

/// Maven Central's solr search endpoint
pub const MAVEN_CENTRAL_SEARCH_URL: &str = "https://search.maven.org/solrsearch/select";

/// Default remote repositories, in display order: (id, name, base URL)
pub const DEFAULT_REMOTE_REPOSITORIES: &[(&str, &str, &str)] = &[
    ("central", "Maven Central", "https://repo.maven.apache.org/maven2/"),
    ("google", "Google Maven", "https://maven.google.com/"),
    ("jcenter", "JCenter", "https://jcenter.bintray.com/"),
    ("spring", "Spring Releases", "https://repo.spring.io/release/"),
    (
        "atlassian",
        "Atlassian Public",
        "https://packages.atlassian.com/maven-external/",
    ),
];

/// Returns the default local repository root: `$HOME/.m2/repository`, or
/// `./.m2/repository` when no home directory is available.
pub fn default_local_root() -> PathBuf {
    local_root_with_home(dirs::home_dir())
}

fn local_root_with_home(home_dir: Option<PathBuf>) -> PathBuf {
    home_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".m2/repository")
}
