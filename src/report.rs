//! Console rendering of enriched dependency records
//!
//! Pure string production; the binary decides where it goes. This is
//! display glue over the lookup results, not part of the engine.

use std::fmt::Write as _;

use crate::config;
use crate::dependency::Dependency;
use crate::repository::{LOCAL_REPOSITORY_ID, RepositoryRegistry};
use crate::version::checker::LookupOutcome;
use crate::version::ordering::VersionOrdering;

/// Renders one block per dependency: declared version, upgrade hint,
/// per-source breakdown, and conflict annotations.
pub fn render(
    dependencies: &[Dependency],
    outcomes: &[LookupOutcome],
    registry: &RepositoryRegistry,
    ordering: VersionOrdering,
) -> String {
    let mut out = String::new();

    for (dependency, outcome) in dependencies.iter().zip(outcomes) {
        match outcome {
            LookupOutcome::Skipped => {
                let _ = writeln!(
                    out,
                    "Skipping {} - version uses property placeholder: {}",
                    dependency.coordinate,
                    dependency.version.as_deref().unwrap_or("(none)")
                );
            }
            LookupOutcome::NoVersionsFound => {
                let _ = writeln!(out, "Checking {}", dependency.coordinates());
                let _ = writeln!(
                    out,
                    "  Current version: {}",
                    dependency.version.as_deref().unwrap_or("(none)")
                );
                let _ = writeln!(out, "  No versions found in any repository");
            }
            LookupOutcome::Resolved(resolved) => {
                let _ = writeln!(out, "Checking {}", dependency.coordinates());
                let declared = dependency.version.as_deref();
                let _ = writeln!(
                    out,
                    "  Current version: {}",
                    declared.unwrap_or("(none)")
                );

                if let Some(latest) = resolved.latest()
                    && declared.is_none_or(|d| ordering.compare(latest, d) == std::cmp::Ordering::Greater)
                {
                    let _ = writeln!(out, "  UPGRADE AVAILABLE: {latest}");
                }

                for row in resolved.breakdown(
                    registry,
                    &dependency.coordinate,
                    config::RECENT_DISPLAY_COUNT,
                ) {
                    let _ = writeln!(out, "  {} ({} versions):", row.label, row.version_count);
                    let _ = writeln!(out, "    Latest: {}", row.latest);
                    let _ = writeln!(out, "    Recent: {}", row.recent.join(", "));
                    if row.id == LOCAL_REPOSITORY_ID {
                        let _ = writeln!(out, "    Path: {}", row.location);
                    } else {
                        let _ = writeln!(out, "    URL: {}", row.location);
                    }
                }
            }
        }

        if dependency.has_conflicts
            && let Some(details) = dependency.conflict_details.as_deref()
        {
            let _ = writeln!(out, "  CONFLICT: {details}");
        }

        out.push('\n');
    }

    out
}
