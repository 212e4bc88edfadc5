//! Repository descriptors, the known-repository registry, and artifact URL
//! construction

use indexmap::IndexMap;

use crate::config;
use crate::dependency::Coordinate;

/// Reserved id of the local repository descriptor
pub const LOCAL_REPOSITORY_ID: &str = "local";

/// One place that can answer "what versions exist for this coordinate":
/// either a remote Maven repository or the local on-disk cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryDescriptor {
    /// Unique, stable id ("central", "google", ...); "local" is reserved for
    /// the local cache
    pub id: String,
    /// Display name
    pub name: String,
    /// Base URL for remotes, filesystem root for the local cache
    pub url: String,
    pub is_local: bool,
    /// Search-index endpoint consulted between the metadata and listing
    /// strategies; only the central repository has one by default
    pub search_url: Option<String>,
}

impl RepositoryDescriptor {
    pub fn remote(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
            is_local: false,
            search_url: None,
        }
    }

    pub fn with_search_url(mut self, search_url: impl Into<String>) -> Self {
        self.search_url = Some(search_url.into());
        self
    }

    /// The local cache descriptor rooted at the given path
    pub fn local(root: impl Into<String>) -> Self {
        Self {
            id: LOCAL_REPOSITORY_ID.to_string(),
            name: "Local Repository".to_string(),
            url: root.into(),
            is_local: true,
            search_url: None,
        }
    }

    /// Base URL normalized to end with a single trailing `/`. Remote
    /// repositories are sensitive to the exact URL shape, so concatenation
    /// below must stay byte-for-byte stable.
    fn base(&self) -> String {
        if self.url.ends_with('/') {
            self.url.clone()
        } else {
            format!("{}/", self.url)
        }
    }

    /// `base/group-path/artifact/version`
    pub fn artifact_url(&self, coordinate: &Coordinate, version: &str) -> String {
        format!(
            "{}{}/{}/{}",
            self.base(),
            coordinate.group_path(),
            coordinate.artifact_id,
            version
        )
    }

    /// `base/group-path/artifact/maven-metadata.xml`
    pub fn metadata_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}{}/{}/maven-metadata.xml",
            self.base(),
            coordinate.group_path(),
            coordinate.artifact_id
        )
    }

    /// `base/group-path/artifact/`, the flat directory listing
    pub fn listing_url(&self, coordinate: &Coordinate) -> String {
        format!(
            "{}{}/{}/",
            self.base(),
            coordinate.group_path(),
            coordinate.artifact_id
        )
    }
}

/// The set of repositories consulted during a lookup pass.
///
/// Remote descriptors are kept in insertion order (definition order is
/// display order) and de-duplicated by id and by URL. The local descriptor
/// is held separately so at most one can exist, and its id never collides
/// with a remote id.
#[derive(Debug, Clone, Default)]
pub struct RepositoryRegistry {
    remotes: IndexMap<String, RepositoryDescriptor>,
    local: Option<RepositoryDescriptor>,
}

impl RepositoryRegistry {
    /// An empty registry with no repositories configured
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the default remote repositories
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (id, name, url) in config::DEFAULT_REMOTE_REPOSITORIES {
            let mut descriptor = RepositoryDescriptor::remote(*id, *name, *url);
            if *id == "central" {
                descriptor = descriptor.with_search_url(config::MAVEN_CENTRAL_SEARCH_URL);
            }
            registry.add(descriptor);
        }
        registry
    }

    /// Adds a remote descriptor. Returns false (and leaves the registry
    /// unchanged) when the descriptor is local, uses the reserved "local"
    /// id, or duplicates an existing id or URL.
    pub fn add(&mut self, descriptor: RepositoryDescriptor) -> bool {
        if descriptor.is_local || descriptor.id == LOCAL_REPOSITORY_ID {
            return false;
        }
        let duplicate = self.remotes.contains_key(&descriptor.id)
            || self.remotes.values().any(|r| r.url == descriptor.url);
        if duplicate {
            return false;
        }
        self.remotes.insert(descriptor.id.clone(), descriptor);
        true
    }

    /// Sets (or replaces) the local cache descriptor.
    pub fn set_local_root(&mut self, root: impl Into<String>) {
        self.local = Some(RepositoryDescriptor::local(root));
    }

    pub fn local(&self) -> Option<&RepositoryDescriptor> {
        self.local.as_ref()
    }

    pub fn remotes(&self) -> impl Iterator<Item = &RepositoryDescriptor> {
        self.remotes.values()
    }

    pub fn remote_count(&self) -> usize {
        self.remotes.len()
    }

    /// Looks up any descriptor (remote or local) by id.
    pub fn get(&self, id: &str) -> Option<&RepositoryDescriptor> {
        if id == LOCAL_REPOSITORY_ID {
            self.local.as_ref()
        } else {
            self.remotes.get(id)
        }
    }
}
