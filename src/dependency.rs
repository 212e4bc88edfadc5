//! Artifact coordinates and the enriched dependency record

use std::fmt;

/// Identity of an artifact: group id + artifact id, independent of version
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub group_id: String,
    pub artifact_id: String,
}

impl Coordinate {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    /// Group id with `.` separators mapped to path separators
    /// (e.g. "org.slf4j" -> "org/slf4j")
    pub fn group_path(&self) -> String {
        self.group_id.replace('.', "/")
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// A declared dependency plus the metadata filled in by the enrichment
/// pipeline.
///
/// `latest_version` and `outdated` are kept private: `outdated` is derived
/// from the declared and latest versions and is recomputed whenever the
/// latest version is set, so the two can never be observed out of sync.
#[derive(Debug, Clone, Default)]
pub struct Dependency {
    pub coordinate: Coordinate,
    /// Declared version; may be absent or a `${property}` placeholder
    pub version: Option<String>,
    pub scope: Option<String>,
    /// Packaging type ("jar" when unset); also the binary extension used by
    /// the local cache scanner
    pub packaging: Option<String>,
    pub classifier: Option<String>,
    pub optional: bool,

    latest_version: Option<String>,
    outdated: bool,
    pub available_versions: Vec<String>,
    pub has_conflicts: bool,
    pub conflict_details: Option<String>,
    pub repository_url: Option<String>,
    pub local_path: Option<String>,
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl Dependency {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            coordinate: Coordinate::new(group_id, artifact_id),
            version,
            ..Default::default()
        }
    }

    /// Full dependency identity: coordinate plus classifier. The declared
    /// version is deliberately not part of identity.
    pub fn identity(&self) -> (&Coordinate, Option<&str>) {
        (&self.coordinate, self.classifier.as_deref())
    }

    /// Binary file extension for this dependency ("jar" unless packaging
    /// says otherwise)
    pub fn extension(&self) -> &str {
        self.packaging.as_deref().unwrap_or("jar")
    }

    /// True when the declared version is absent or an unexpanded
    /// `${property}` placeholder; such records are skipped by lookups.
    pub fn has_unresolved_version(&self) -> bool {
        match self.version.as_deref() {
            None => true,
            Some(v) => v.starts_with("${") && v.ends_with('}'),
        }
    }

    pub fn latest_version(&self) -> Option<&str> {
        self.latest_version.as_deref()
    }

    /// Sets the latest known version and recomputes the outdated flag in the
    /// same step.
    pub fn set_latest_version(&mut self, latest: Option<String>) {
        self.outdated = latest
            .as_deref()
            .is_some_and(|l| Some(l) != self.version.as_deref());
        self.latest_version = latest;
    }

    pub fn is_outdated(&self) -> bool {
        self.outdated
    }

    /// Flags this record as conflicting with the given human-readable detail.
    pub fn mark_conflict(&mut self, details: String) {
        self.has_conflicts = true;
        self.conflict_details = Some(details);
    }

    /// Coordinates in `group:artifact:version[:classifier][@type]` form
    pub fn coordinates(&self) -> String {
        let mut out = format!(
            "{}:{}",
            self.coordinate,
            self.version.as_deref().unwrap_or("")
        );
        if let Some(classifier) = self.classifier.as_deref()
            && !classifier.is_empty()
        {
            out.push(':');
            out.push_str(classifier);
        }
        if let Some(packaging) = self.packaging.as_deref()
            && packaging != "jar"
        {
            out.push('@');
            out.push_str(packaging);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn group_path_maps_dots_to_slashes() {
        let coord = Coordinate::new("org.apache.commons", "commons-lang3");
        assert_eq!(coord.group_path(), "org/apache/commons");
    }

    #[test]
    fn coordinate_identity_ignores_version() {
        let a = Coordinate::new("org.slf4j", "slf4j-api");
        let b = Coordinate::new("org.slf4j", "slf4j-api");
        assert_eq!(a, b);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("${project.version}"), true)]
    #[case(Some("1.7.36"), false)]
    #[case(Some("${unclosed"), false)]
    fn has_unresolved_version_detects_placeholders(
        #[case] version: Option<&str>,
        #[case] expected: bool,
    ) {
        let dep = Dependency::new("org.slf4j", "slf4j-api", version.map(str::to_string));
        assert_eq!(dep.has_unresolved_version(), expected);
    }

    #[test]
    fn set_latest_version_recomputes_outdated() {
        let mut dep = Dependency::new("org.slf4j", "slf4j-api", Some("1.7.36".to_string()));
        assert!(!dep.is_outdated());

        dep.set_latest_version(Some("2.0.9".to_string()));
        assert!(dep.is_outdated());
        assert_eq!(dep.latest_version(), Some("2.0.9"));

        dep.set_latest_version(Some("1.7.36".to_string()));
        assert!(!dep.is_outdated());

        dep.set_latest_version(None);
        assert!(!dep.is_outdated());
    }

    #[test]
    fn coordinates_include_classifier_and_non_jar_packaging() {
        let mut dep = Dependency::new("com.example", "lib", Some("1.0".to_string()));
        dep.classifier = Some("sources".to_string());
        dep.packaging = Some("war".to_string());
        assert_eq!(dep.coordinates(), "com.example:lib:1.0:sources@war");

        let plain = Dependency::new("com.example", "lib", Some("1.0".to_string()));
        assert_eq!(plain.coordinates(), "com.example:lib:1.0");
    }
}
