//! Snapshot tree nodes.
//!
//! A snapshot of a directory is a [`Tree`]: the root's immediate children as
//! [`TreeEntry`] values, where each directory still owns its children. The
//! flattener in `rl-scanner` turns a tree into a [`Catalog`](super::Catalog).

use std::fmt;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Hex-encoded content digest identifying a file by what it contains.
///
/// Uses a newtype so digests cannot be confused with paths or filenames, which
/// are also plain strings in this domain.
///
/// # Examples
///
/// ```
/// use rl_core::ContentHash;
///
/// let a = ContentHash::new("ab12");
/// assert_eq!(a.as_str(), "ab12");
/// assert_eq!(a, ContentHash::from("ab12"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Wraps an already-encoded digest.
    #[inline]
    #[must_use]
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Returns the hex string.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ContentHash {
    #[inline]
    fn from(hex: &str) -> Self {
        Self(hex.to_owned())
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two kinds of filesystem node a snapshot records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A regular file.
    File,
    /// A directory.
    Directory,
}

/// Attributes only files carry.
///
/// # Examples
///
/// ```
/// use rl_core::{ContentHash, FileEntry};
///
/// let file = FileEntry::from_name("util.test.js", ContentHash::from("h1"), None);
/// assert_eq!(file.filename, "util.test");
/// assert_eq!(file.extension.as_deref(), Some("js"));
/// assert!(!file.has_content());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// Extension without the leading dot, `None` when the name has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,

    /// Name minus the extension.
    pub filename: String,

    /// Digest of the full raw content.
    pub hash: ContentHash,

    /// Raw text, captured only for allowlisted text extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileEntry {
    /// Builds a file entry, splitting `name` at its last dot.
    ///
    /// Dotfiles such as `.env` have no extension; their filename is the whole
    /// name.
    #[must_use]
    pub fn from_name(name: &str, hash: ContentHash, content: Option<String>) -> Self {
        let (filename, extension) = split_extension(name);
        Self {
            extension: extension.map(str::to_owned),
            filename: filename.to_owned(),
            hash,
            content,
        }
    }

    /// Returns `true` if the text body was captured.
    #[inline]
    #[must_use]
    pub const fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

/// Splits a file name into `(filename, extension)`.
fn split_extension(name: &str) -> (&str, Option<&str>) {
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(idx) if idx + 1 == name.len() => (name, None),
        Some(idx) => (&name[..idx], Some(&name[idx + 1..])),
    }
}

/// Node-specific payload of a [`TreeEntry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeKind {
    /// A file with its digest and optional text.
    File(FileEntry),
    /// A directory that still owns its children.
    Directory {
        /// Immediate children in directory-listing order.
        children: Vec<TreeEntry>,
    },
}

/// One filesystem node of a snapshot [`Tree`].
///
/// # Examples
///
/// ```
/// use rl_core::{ContentHash, FileEntry, TreeEntry};
///
/// let file = TreeEntry::file(
///     "src/util.js",
///     FileEntry::from_name("util.js", ContentHash::from("h1"), None),
/// );
/// let dir = TreeEntry::directory("src", vec![file]);
///
/// assert_eq!(dir.name, "src");
/// assert_eq!(dir.count(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Final path component.
    pub name: String,

    /// Path relative to the configured root, `/`-separated.
    pub uri: Utf8PathBuf,

    /// File or directory payload.
    #[serde(flatten)]
    pub kind: TreeKind,
}

impl TreeEntry {
    /// Creates a file entry; the name is the uri's final component.
    #[must_use]
    pub fn file(uri: impl Into<Utf8PathBuf>, file: FileEntry) -> Self {
        let uri = uri.into();
        Self {
            name: uri.file_name().unwrap_or(uri.as_str()).to_owned(),
            uri,
            kind: TreeKind::File(file),
        }
    }

    /// Creates a directory entry; the name is the uri's final component.
    #[must_use]
    pub fn directory(uri: impl Into<Utf8PathBuf>, children: Vec<Self>) -> Self {
        let uri = uri.into();
        Self {
            name: uri.file_name().unwrap_or(uri.as_str()).to_owned(),
            uri,
            kind: TreeKind::Directory { children },
        }
    }

    /// Returns the node type.
    #[inline]
    #[must_use]
    pub const fn entry_type(&self) -> EntryType {
        match self.kind {
            TreeKind::File(_) => EntryType::File,
            TreeKind::Directory { .. } => EntryType::Directory,
        }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn count(&self) -> usize {
        match &self.kind {
            TreeKind::File(_) => 1,
            TreeKind::Directory { children } => 1 + children.iter().map(Self::count).sum::<usize>(),
        }
    }
}

/// The immediate children of a snapshot root.
pub type Tree = Vec<TreeEntry>;
