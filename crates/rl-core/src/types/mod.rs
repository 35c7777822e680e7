//! Domain types for the relink tool.
//!
//! # Module Organization
//!
//! - [`entry`] - Snapshot tree nodes and content digests
//! - [`catalog`] - Flattened, comparable snapshot catalogs
//! - [`migration`] - Cross-catalog correspondences
//! - [`reference`] - Located import literals
//! - [`edit`] - Offset-based text substitutions
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use rl_core::{Catalog, MigrationRecord, Reference, Edit};
//! ```

pub mod catalog;
pub mod edit;
pub mod entry;
pub mod migration;
pub mod reference;

pub use catalog::{Catalog, CatalogEntry, CatalogKind};
pub use edit::Edit;
pub use entry::{ContentHash, EntryType, FileEntry, Tree, TreeEntry, TreeKind};
pub use migration::{Correspondence, MigrationRecord};
pub use reference::{Reference, ReferenceGroup};
