//! Import reference extraction and rewriting.
//!
//! Once the matcher has decided which files moved, this crate keeps source
//! text resolving: it finds import-path literals lexically, decides which of
//! them point at moved files (or are written relative to a file that itself
//! moved), and splices in new paths with offset-tracked edits.
//!
//! # Overview
//!
//! - [`ReferenceExtractor`] / [`PatternExtractor`]: regex-based literal search
//! - [`classify`] / [`ReferenceKind`]: relative, absolute or library
//! - [`strip_resolvable_extension`], [`normalize`], [`relative_path`]: path
//!   arithmetic on catalog uris
//! - [`EditPlanner`]: references plus migration records to [`Edit`](rl_core::Edit)s
//! - [`apply_edits`]: splice edits with a running delta
//! - [`Rewriter`]: all of the above over a whole catalog
//!
//! # Example
//!
//! ```
//! use rl_core::{ContentHash, FileEntry, MigrationRecord, RewriteConfig};
//! use rl_rewrite::Rewriter;
//! use camino::Utf8Path;
//!
//! let util = FileEntry::from_name("util.js", ContentHash::from("h1"), None);
//! let records = [MigrationRecord::between(
//!     "util.js",
//!     (Utf8Path::new("src/util.js"), &util),
//!     (Utf8Path::new("src/lib/util.js"), &util),
//! )];
//!
//! let rewriter = Rewriter::new(RewriteConfig::default())?;
//! let patched = rewriter
//!     .rewrite_file(
//!         Utf8Path::new("src/index.js"),
//!         Utf8Path::new("src/index.js"),
//!         r#"import { x } from "./util";"#,
//!         &records,
//!     )?
//!     .expect("the import points at a moved file");
//!
//! assert_eq!(patched.content, r#"import { x } from "./lib/util";"#);
//! # Ok::<(), rl_rewrite::RewriteError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod classify;
mod edit;
mod error;
mod extract;
mod planner;
mod resolve;

pub use classify::{ReferenceKind, classify};
pub use edit::apply_edits;
pub use error::RewriteError;
pub use extract::{PATH_GROUP, PatternExtractor, ReferenceExtractor};
pub use planner::{EditPlanner, PatchedFile, Rewriter};
pub use resolve::{
    has_resolvable_extension, join_relative, normalize, parent_dir, relative_path,
    strip_resolvable_extension,
};
