//! Declared-version conflict detection
//!
//! Reasons purely about what the project declares; no network or
//! filesystem access. Two or more declarations of the same coordinate
//! with different non-null versions is a conflict, and every declaration
//! in the group gets flagged.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

use crate::dependency::{Coordinate, Dependency};

const MANAGED_MARKER: &str = "(version managed from ";

/// Groups the full declared set (direct plus managed) by coordinate and
/// flags every member of a group that declares more than one distinct
/// version. Deterministic: the detail string lists the distinct versions in
/// sorted order.
pub fn detect_conflicts(dependencies: &mut [Dependency]) {
    let mut groups: HashMap<Coordinate, Vec<usize>> = HashMap::new();
    for (index, dependency) in dependencies.iter().enumerate() {
        groups
            .entry(dependency.coordinate.clone())
            .or_default()
            .push(index);
    }

    for members in groups.into_values() {
        if members.len() < 2 {
            continue;
        }

        let versions: BTreeSet<&str> = members
            .iter()
            .filter_map(|&i| dependencies[i].version.as_deref())
            .collect();

        if versions.len() > 1 {
            let details = format!(
                "Multiple versions found: {}",
                versions.into_iter().collect::<Vec<_>>().join(", ")
            );
            for &i in &members {
                dependencies[i].mark_conflict(details.clone());
            }
        }
    }
}

/// Best-effort secondary mode: scans a rendered dependency-tree report for
/// "version managed from" markers and flags the matching declared records
/// with the losing and winning versions. Lines that do not slice cleanly
/// are skipped with a warning; this never fails.
pub fn apply_managed_version_report(dependencies: &mut [Dependency], report: &str) {
    for line in report.lines() {
        if !line.contains(MANAGED_MARKER) {
            continue;
        }

        let Some((coordinate, losing, winning)) = parse_managed_line(line) else {
            warn!("Skipping unparseable dependency tree line: {}", line);
            continue;
        };

        let details = format!("Version conflict: {losing} -> {winning}");
        for dependency in dependencies
            .iter_mut()
            .filter(|d| d.coordinate == coordinate)
        {
            dependency.mark_conflict(details.clone());
        }
    }
}

/// Slices one tree line of the shape
/// `[INFO] |  \- group:artifact:type:version:scope (version managed from X)`
/// into (coordinate, losing version, winning version).
fn parse_managed_line(line: &str) -> Option<(Coordinate, String, String)> {
    let token_start = line.find("- ")? + 2;
    let marker_start = line.find(MANAGED_MARKER)?;
    let token = line.get(token_start..marker_start)?.trim();

    // group:artifact:type:version:scope; the winning version is the
    // fourth field.
    let mut fields = token.split(':');
    let group_id = fields.next()?;
    let artifact_id = fields.next()?;
    let _packaging = fields.next()?;
    let winning = fields.next()?;
    if group_id.is_empty() || artifact_id.is_empty() || winning.is_empty() {
        return None;
    }

    let losing_start = marker_start + MANAGED_MARKER.len();
    let losing_end = line[losing_start..].find(')')? + losing_start;
    let losing = &line[losing_start..losing_end];

    Some((
        Coordinate::new(group_id, artifact_id),
        losing.to_string(),
        winning.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dep(group: &str, artifact: &str, version: Option<&str>) -> Dependency {
        Dependency::new(group, artifact, version.map(str::to_string))
    }

    #[test]
    fn flags_every_member_when_versions_differ() {
        let mut deps = vec![
            dep("com.example", "lib", Some("1.0")),
            dep("com.example", "lib", Some("1.0")),
            dep("com.example", "lib", Some("2.0")),
        ];

        detect_conflicts(&mut deps);

        for d in &deps {
            assert!(d.has_conflicts);
            let details = d.conflict_details.as_deref().unwrap();
            assert!(details.contains("1.0") && details.contains("2.0"));
        }
    }

    #[test]
    fn agreeing_duplicates_are_not_conflicts() {
        let mut deps = vec![
            dep("com.example", "lib", Some("1.0")),
            dep("com.example", "lib", Some("1.0")),
            dep("com.example", "lib", Some("1.0")),
        ];

        detect_conflicts(&mut deps);

        assert!(deps.iter().all(|d| !d.has_conflicts));
    }

    #[test]
    fn different_coordinates_never_conflict() {
        let mut deps = vec![
            dep("com.example", "lib-a", Some("1.0")),
            dep("com.example", "lib-b", Some("2.0")),
        ];

        detect_conflicts(&mut deps);

        assert!(deps.iter().all(|d| !d.has_conflicts));
    }

    #[test]
    fn null_versions_do_not_count_as_distinct() {
        let mut deps = vec![
            dep("com.example", "lib", Some("1.0")),
            dep("com.example", "lib", None),
        ];

        detect_conflicts(&mut deps);

        assert!(deps.iter().all(|d| !d.has_conflicts));
    }

    #[test]
    fn detail_lists_distinct_versions_in_sorted_order() {
        let mut deps = vec![
            dep("com.example", "lib", Some("2.0")),
            dep("com.example", "lib", Some("1.0")),
        ];

        detect_conflicts(&mut deps);

        assert_eq!(
            deps[0].conflict_details.as_deref(),
            Some("Multiple versions found: 1.0, 2.0")
        );
    }

    #[test]
    fn managed_report_flags_the_matching_dependency() {
        let mut deps = vec![dep("commons-collections", "commons-collections", Some("3.2.1"))];
        let report = "[INFO] +- com.example:app:jar:1.0:compile\n\
             [INFO] |  \\- commons-collections:commons-collections:jar:3.2.1:compile (version managed from 3.1)\n";

        apply_managed_version_report(&mut deps, report);

        assert!(deps[0].has_conflicts);
        assert_eq!(
            deps[0].conflict_details.as_deref(),
            Some("Version conflict: 3.1 -> 3.2.1")
        );
    }

    #[test]
    fn managed_report_skips_malformed_lines() {
        let mut deps = vec![dep("com.example", "lib", Some("1.0"))];
        let report = "garbage (version managed from 0.9)\n\
             no marker on this line\n\
             - justonefield (version managed from 1.1)\n";

        apply_managed_version_report(&mut deps, report);

        assert!(!deps[0].has_conflicts);
    }

    #[test]
    fn managed_report_ignores_unknown_coordinates() {
        let mut deps = vec![dep("com.example", "lib", Some("1.0"))];
        let report =
            "[INFO] \\- org.other:thing:jar:2.0:compile (version managed from 1.0)\n";

        apply_managed_version_report(&mut deps, report);

        assert!(!deps[0].has_conflicts);
    }
}
