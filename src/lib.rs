//! version-scout: multi-source artifact version resolution
//!
//! Given a set of declared dependency coordinates and a registry of known
//! repositories, this crate answers which versions of each artifact exist
//! across the local cache and every remote repository, which version is
//! newest, and whether the declared set contradicts itself. Lookups fan
//! out concurrently per coordinate and tolerate any subset of sources
//! being unreachable; the worst case is an empty answer, never a failure.
//!
//! Manifest parsing and presentation live outside this crate: callers
//! hand in parsed [`dependency::Dependency`] records and a
//! [`repository::RepositoryRegistry`], and get the records back enriched.

pub mod config;
pub mod dependency;
pub mod report;
pub mod repository;
pub mod version;
