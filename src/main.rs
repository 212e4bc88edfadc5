use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use version_scout::config;
use version_scout::dependency::Dependency;
use version_scout::report;
use version_scout::repository::{RepositoryDescriptor, RepositoryRegistry};
use version_scout::version::conflict;
use version_scout::version::{VersionChecker, VersionOrdering};

#[derive(Parser)]
#[command(name = "version-scout")]
#[command(version, about = "Check artifact versions across Maven repositories")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check declared coordinates against the configured repositories
    Check(CheckArgs),
}

#[derive(Args)]
struct CheckArgs {
    /// Coordinates to check, as group:artifact[:version]
    #[arg(required = true, value_name = "COORDINATE")]
    coordinates: Vec<String>,

    /// Additional remote repository, as id=name=url (repeatable)
    #[arg(long = "repo", value_name = "ID=NAME=URL")]
    repositories: Vec<String>,

    /// Local repository cache root (defaults to ~/.m2/repository)
    #[arg(long, value_name = "PATH")]
    local_root: Option<PathBuf>,

    /// Per-repository collection timeout in seconds
    #[arg(long, default_value_t = config::COLLECT_TIMEOUT_SECS)]
    timeout: u64,

    /// Rendered dependency-tree report to scan for managed-version
    /// conflicts
    #[arg(long, value_name = "PATH")]
    tree_report: Option<PathBuf>,

    /// Rank versions numerically instead of lexicographically
    #[arg(long)]
    semantic_order: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?
            .block_on(check(args)),
    }
}

async fn check(args: CheckArgs) -> anyhow::Result<()> {
    let mut registry = RepositoryRegistry::with_defaults();
    for spec in &args.repositories {
        match parse_repository(spec) {
            Some(descriptor) => {
                if !registry.add(descriptor) {
                    warn!("Ignoring duplicate repository: {}", spec);
                }
            }
            None => warn!(
                "Ignoring malformed repository (expected id=name=url): {}",
                spec
            ),
        }
    }

    let local_root = args.local_root.unwrap_or_else(config::default_local_root);
    registry.set_local_root(local_root.display().to_string());

    let mut dependencies: Vec<Dependency> = args
        .coordinates
        .iter()
        .filter_map(|spec| {
            let dependency = parse_coordinate(spec);
            if dependency.is_none() {
                warn!(
                    "Ignoring malformed coordinate (expected group:artifact[:version]): {}",
                    spec
                );
            }
            dependency
        })
        .collect();

    let ordering = if args.semantic_order {
        VersionOrdering::Semantic
    } else {
        VersionOrdering::Lexicographic
    };

    let checker = VersionChecker::new(registry)
        .with_ordering(ordering)
        .with_collect_timeout(Duration::from_secs(args.timeout));

    let outcomes = checker.enrich_all(&mut dependencies).await;
    conflict::detect_conflicts(&mut dependencies);

    if let Some(path) = &args.tree_report {
        let report = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tree report {}", path.display()))?;
        conflict::apply_managed_version_report(&mut dependencies, &report);
    }

    print!(
        "{}",
        report::render(&dependencies, &outcomes, checker.registry(), ordering)
    );

    Ok(())
}

fn parse_repository(spec: &str) -> Option<RepositoryDescriptor> {
    let mut parts = spec.splitn(3, '=');
    let id = parts.next()?;
    let name = parts.next()?;
    let url = parts.next()?;
    if id.is_empty() || url.is_empty() {
        return None;
    }
    let name = if name.is_empty() { id } else { name };
    Some(RepositoryDescriptor::remote(id, name, url))
}

fn parse_coordinate(spec: &str) -> Option<Dependency> {
    let mut parts = spec.splitn(3, ':');
    let group_id = parts.next()?;
    let artifact_id = parts.next()?;
    let version = parts.next().map(str::to_string);
    if group_id.is_empty() || artifact_id.is_empty() {
        return None;
    }
    Some(Dependency::new(group_id, artifact_id, version))
}
