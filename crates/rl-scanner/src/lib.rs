//! Directory snapshots and content-addressed catalogs.
//!
//! This crate turns a directory on disk into the two representations the
//! matcher and rewriter work from:
//!
//! - a nested [`Tree`] mirroring the directory, with a BLAKE3 digest on every
//!   file and the text of allowlisted file types
//! - a flat [`Catalog`] in depth-first pre-order, where each directory carries
//!   the digests of its immediate files
//!
//! # Overview
//!
//! - [`SnapshotBuilder`]: recursive scan driven by [`ScanConfig`]
//! - [`DirLister`]: single-level listing on top of the `ignore` walker
//! - [`flatten`]: explicit-stack tree to catalog conversion
//! - [`hash_bytes`] / [`hash_file`]: content digests
//! - [`ScanStats`]: atomic counters for the build
//!
//! # Example
//!
//! ```no_run
//! use camino::Utf8Path;
//! use rl_core::ScanConfig;
//!
//! let catalog = rl_scanner::snapshot(Utf8Path::new("./before"), &ScanConfig::default())?
//!     .unwrap_or_default();
//! println!("{} catalog entries", catalog.len());
//! # Ok::<(), rl_scanner::ScanError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! snapshot(root)
//!     │
//!     ├── SnapshotBuilder (recursive, optionally rayon per level)
//!     │       │
//!     │       ├── DirLister (ignore crate, depth 1)
//!     │       └── hash_bytes (blake3)
//!     │
//!     └── flatten (explicit stack, pre-order)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod builder;
mod digest;
mod error;
mod flatten;
mod stats;
mod walker;

pub use builder::SnapshotBuilder;
pub use digest::{hash_bytes, hash_file};
pub use error::ScanError;
pub use flatten::flatten;
pub use stats::{ScanStats, StatsSnapshot};
pub use walker::{DirLister, Listed};

use camino::Utf8Path;
use rl_core::{Catalog, ScanConfig, Tree};
use tracing::debug;

/// Snapshots `root` and flattens the result in one step.
///
/// Returns `Ok(None)` when `root` is missing or not a directory.
///
/// # Errors
///
/// Propagates scan failures and [`ScanError::Catalog`] if the flattened
/// entries do not form a valid catalog.
pub fn snapshot(root: &Utf8Path, config: &ScanConfig) -> Result<Option<Catalog>, ScanError> {
    let Some(tree) = SnapshotBuilder::new(config.clone()).build(root)? else {
        return Ok(None);
    };

    let catalog = flatten(tree)?;
    debug!(root = %root, entries = catalog.len(), "Flattened snapshot");
    Ok(Some(catalog))
}

/// Flattens a tree that was produced elsewhere, such as one read from JSON.
///
/// # Errors
///
/// Returns [`ScanError::Catalog`] if the tree repeats a uri.
pub fn catalog_from_tree(tree: Tree) -> Result<Catalog, ScanError> {
    Ok(flatten(tree)?)
}
