//! Cross-catalog correspondences.
//!
//! A [`MigrationRecord`] claims that one file of a "from" catalog became one
//! file of a "to" catalog. [`Correspondence`] is the tagged outcome of looking
//! a key up in both catalogs, so collisions are visible instead of being
//! resolved by "first occurrence wins".

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entry::{ContentHash, EntryType, FileEntry};

/// A claimed correspondence between two files.
///
/// # Examples
///
/// ```
/// use rl_core::{ContentHash, FileEntry, MigrationRecord};
/// use camino::Utf8Path;
///
/// let from = FileEntry::from_name("util.js", ContentHash::from("h1"), None);
/// let to = FileEntry::from_name("util.js", ContentHash::from("h1"), None);
///
/// let record = MigrationRecord::between(
///     "util.js",
///     (Utf8Path::new("src/util.js"), &from),
///     (Utf8Path::new("src/lib/util.js"), &to),
/// );
/// assert!(record.migrated);
/// assert!(!record.modified);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecord {
    /// The digests differ.
    pub modified: bool,

    /// The paths differ.
    pub migrated: bool,

    /// Always [`EntryType::File`]; directories never correspond.
    #[serde(rename = "type")]
    pub kind: EntryType,

    /// Name of the "from" file.
    pub name: String,

    /// Uri in the "from" catalog.
    pub from_path: Utf8PathBuf,

    /// Digest in the "from" catalog.
    pub from_hash: ContentHash,

    /// Captured text in the "from" catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_content: Option<String>,

    /// Uri in the "to" catalog.
    pub to_path: Utf8PathBuf,

    /// Digest in the "to" catalog.
    pub to_hash: ContentHash,

    /// Captured text in the "to" catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_content: Option<String>,
}

impl MigrationRecord {
    /// Builds a record from a `(uri, file)` pair on each side.
    #[must_use]
    pub fn between(
        name: impl Into<String>,
        (from_uri, from): (&Utf8Path, &FileEntry),
        (to_uri, to): (&Utf8Path, &FileEntry),
    ) -> Self {
        Self {
            modified: from.hash != to.hash,
            migrated: from_uri != to_uri,
            kind: EntryType::File,
            name: name.into(),
            from_path: from_uri.to_owned(),
            from_hash: from.hash.clone(),
            from_content: from.content.clone(),
            to_path: to_uri.to_owned(),
            to_hash: to.hash.clone(),
            to_content: to.content.clone(),
        }
    }

    /// Returns `true` if neither the path nor the content changed.
    #[inline]
    #[must_use]
    pub const fn is_unchanged(&self) -> bool {
        !self.modified && !self.migrated
    }
}

/// Outcome of looking one identity key up in two catalogs.
///
/// # Examples
///
/// ```
/// use rl_core::Correspondence;
/// use camino::Utf8PathBuf;
/// use smallvec::smallvec;
///
/// let hit = Correspondence::Unique {
///     from: Utf8PathBuf::from("a.js"),
///     to: Utf8PathBuf::from("lib/a.js"),
/// };
/// assert!(hit.is_unique());
///
/// let clash = Correspondence::Ambiguous {
///     from: smallvec![Utf8PathBuf::from("a/index.js"), Utf8PathBuf::from("b/index.js")],
///     to: smallvec![Utf8PathBuf::from("index.js")],
/// };
/// assert!(clash.is_ambiguous());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Correspondence {
    /// Exactly one candidate on each side.
    Unique {
        /// Uri in the "from" catalog.
        from: Utf8PathBuf,
        /// Uri in the "to" catalog.
        to: Utf8PathBuf,
    },

    /// The key is present on both sides, with more than one candidate on at
    /// least one of them.
    Ambiguous {
        /// Every "from" candidate in catalog order.
        from: SmallVec<[Utf8PathBuf; 2]>,
        /// Every "to" candidate in catalog order.
        to: SmallVec<[Utf8PathBuf; 2]>,
    },

    /// The key is present on one side only.
    NoMatch,
}

impl Correspondence {
    /// Returns `true` for [`Correspondence::Unique`].
    #[inline]
    #[must_use]
    pub const fn is_unique(&self) -> bool {
        matches!(self, Self::Unique { .. })
    }

    /// Returns `true` for [`Correspondence::Ambiguous`].
    #[inline]
    #[must_use]
    pub const fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }
}
