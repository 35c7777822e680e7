//! Flattened snapshot catalogs.
//!
//! A [`Catalog`] is the comparable form of a snapshot: a pre-order list in
//! which every directory is immediately followed by its whole subtree, and
//! each directory only remembers the digests of its immediate files.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use super::entry::{ContentHash, EntryType, FileEntry};
use crate::error::CoreError;
use crate::hash::{FxHashSet, fx_hash_set_with_capacity};

/// Node-specific payload of a [`CatalogEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CatalogKind {
    /// A file with its digest and optional text.
    File(FileEntry),
    /// A collapsed directory.
    Directory {
        /// Digests of the immediate file children, in child order.
        /// Nested directories contribute nothing.
        file_hashes: Vec<ContentHash>,
    },
}

/// One node of a [`Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Final path component.
    pub name: String,

    /// Path relative to the snapshot root. Unique within a catalog.
    pub uri: Utf8PathBuf,

    /// File or directory payload.
    #[serde(flatten)]
    pub kind: CatalogKind,
}

impl CatalogEntry {
    /// Returns the file payload, or `None` for directories.
    #[inline]
    #[must_use]
    pub const fn as_file(&self) -> Option<&FileEntry> {
        match &self.kind {
            CatalogKind::File(file) => Some(file),
            CatalogKind::Directory { .. } => None,
        }
    }

    /// Returns the node type.
    #[inline]
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        match self.kind {
            CatalogKind::File(_) => EntryType::File,
            CatalogKind::Directory { .. } => EntryType::Directory,
        }
    }
}

/// A flattened snapshot of a directory tree.
///
/// Construction checks that every uri is unique; deserialisation goes through
/// the same check, so a catalog loaded from JSON holds the invariant too.
///
/// # Examples
///
/// ```
/// use rl_core::{Catalog, CatalogEntry, CatalogKind, ContentHash, FileEntry};
///
/// let entry = CatalogEntry {
///     name: "util.js".to_owned(),
///     uri: "src/util.js".into(),
///     kind: CatalogKind::File(FileEntry::from_name("util.js", ContentHash::from("h1"), None)),
/// };
///
/// let catalog = Catalog::new(vec![entry.clone()])?;
/// assert_eq!(catalog.files().count(), 1);
///
/// // Duplicate uris are rejected.
/// assert!(Catalog::new(vec![entry.clone(), entry]).is_err());
/// # Ok::<(), rl_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Creates a catalog after checking that uris are unique.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CoreError> {
        {
            let mut seen: FxHashSet<&Utf8Path> = fx_hash_set_with_capacity(entries.len());
            if let Some(dup) = entries.iter().find(|e| !seen.insert(e.uri.as_path())) {
                return Err(CoreError::invalid_input(format!(
                    "duplicate uri '{}' in catalog",
                    dup.uri
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Parses a catalog previously saved as a JSON array of entries.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        serde_json::from_str(json)
            .map_err(|e| CoreError::invalid_input(format!("malformed catalog: {e}")))
    }

    /// All entries in pre-order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// File entries in catalog order, paired with their file payload.
    pub fn files(&self) -> impl Iterator<Item = (&CatalogEntry, &FileEntry)> {
        self.entries
            .iter()
            .filter_map(|entry| entry.as_file().map(|file| (entry, file)))
    }

    /// Directory entries in catalog order.
    pub fn directories(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.entry_type() == EntryType::Directory)
    }

    /// Looks up an entry by uri.
    #[must_use]
    pub fn get(&self, uri: &Utf8Path) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.uri.as_path() == uri)
    }

    /// Number of entries (files and directories).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Vec<CatalogEntry>> for Catalog {
    type Error = CoreError;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}
