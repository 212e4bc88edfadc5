//! Multi-source version resolution for artifact coordinates
//!
//! This module answers, for one coordinate at a time: which versions exist
//! across the configured sources, which is newest, and does the declared
//! dependency set contradict itself.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Sources   │────▶│   Fan-out   │────▶│  Aggregate  │
//! │ (per repo)  │     │ (bounded)   │     │  (merge)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                                       ▲
//!        ▼                                       │
//! ┌─────────────┐                         ┌─────────────┐
//! │ Strategies  │                         │    Local    │
//! │(meta,search,│                         │  (scanner)  │
//! │  listing)   │                         └─────────────┘
//! └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`checker`]: the enrichment pipeline driving a lookup pass
//! - [`source`]: trait for fetching versions from one configured source
//! - [`sources`]: concrete strategies (metadata, search index, listing)
//! - [`fanout`]: bounded concurrent lookup across every remote source
//! - [`local`]: on-disk repository cache scanner
//! - [`aggregate`]: per-coordinate merge of local and remote results
//! - [`conflict`]: declared-version conflict detection
//! - [`ordering`]: version ordering policies
//! - [`error`]: per-source failure taxonomy
//! - [`types`]: the per-source `VersionSet`

pub mod aggregate;
pub mod checker;
pub mod conflict;
pub mod error;
pub mod fanout;
pub mod local;
pub mod ordering;
pub mod source;
pub mod sources;
pub mod types;

pub use aggregate::{ResolvedVersions, SourceBreakdown};
pub use checker::{LookupOutcome, VersionChecker};
pub use ordering::VersionOrdering;
pub use types::VersionSet;
