//! Core types, errors, and configuration for the relink tool.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - Error types for consistent error handling
//! - Configuration structures (scanning, matching, rewriting)
//! - Domain types (`TreeEntry`, `Catalog`, `MigrationRecord`, `Reference`, `Edit`)
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{Config, MatchConfig, MatchStrategy, RewriteConfig, ScanConfig};
pub use error::{ConfigError, CoreError};
pub use hash::{
    FxBuildHasher, FxHashMap, FxHashSet, fx_hash_map_with_capacity, fx_hash_set_with_capacity,
};
pub use types::{
    Catalog, CatalogEntry, CatalogKind, ContentHash, Correspondence, Edit, EntryType, FileEntry,
    MigrationRecord, Reference, ReferenceGroup, Tree, TreeEntry, TreeKind,
};
