//! Correspondence matching between two snapshot catalogs.
//!
//! Given a "before" and an "after" [`Catalog`](rl_core::Catalog), this crate
//! decides which files are the same file, under one of two identities:
//!
//! - **content digest**: finds moves and renames, blind to edits
//! - **filename** (name without extension): finds edits, blind to renames
//!
//! # Overview
//!
//! - [`match_by_hash`], [`match_by_filename`], [`match_catalogs`]: produce
//!   [`MigrationRecord`](rl_core::MigrationRecord)s sorted by `from_path`
//! - [`correspond`] and its two wrappers: report every key with an explicit
//!   [`Correspondence`](rl_core::Correspondence), so collisions that the
//!   record functions resolve silently stay visible
//! - [`ambiguities`]: just the colliding keys, for diagnostics
//!
//! Only file entries take part; directories never correspond.

#![deny(clippy::all)]
#![warn(missing_docs)]

mod index;
mod records;
mod report;

pub use index::MatchKey;
pub use records::{match_by_filename, match_by_hash, match_catalogs};
pub use report::{KeyReport, ambiguities, correspond, correspond_by_filename, correspond_by_hash};
