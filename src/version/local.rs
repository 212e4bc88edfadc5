//! Local repository cache scanner

use std::fs;
use std::path::Path;

use crate::dependency::Coordinate;

/// Enumerates the version directories materialized on disk for a coordinate
/// under `root/group-path/artifact/`.
///
/// A directory only counts as a version if it holds the expected
/// `artifact-<version>.<ext>` binary, or failing that any file with the
/// artifact's binary extension (classifier variants). Directories with no
/// binary are partial or corrupt downloads and are excluded.
///
/// A missing root or artifact directory yields an empty list, never an
/// error. Read-only; versions are returned unsorted.
pub fn scan_versions(root: &Path, coordinate: &Coordinate, extension: &str) -> Vec<String> {
    let artifact_dir = root
        .join(coordinate.group_path())
        .join(&coordinate.artifact_id);

    let Ok(entries) = fs::read_dir(&artifact_dir) else {
        return Vec::new();
    };

    let mut versions = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(version) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };

        let expected = path.join(format!(
            "{}-{}.{}",
            coordinate.artifact_id, version, extension
        ));
        if expected.is_file() || has_any_binary(&path, extension) {
            versions.push(version);
        }
    }

    versions
}

/// True when the directory holds any file with the binary extension.
fn has_any_binary(dir: &Path, extension: &str) -> bool {
    fs::read_dir(dir)
        .map(|entries| {
            entries.flatten().any(|entry| {
                let path = entry.path();
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .is_some_and(|e| e == extension)
            })
        })
        .unwrap_or(false)
}
