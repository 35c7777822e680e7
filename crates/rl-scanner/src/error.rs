//! Error types for the rl-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! while snapshotting a directory tree or hashing a file.
//!
//! Every variant aborts the scan that raised it. A scan root that does not
//! exist is not an error: [`SnapshotBuilder::build`](crate::SnapshotBuilder::build)
//! returns `Ok(None)` for it.

use camino::Utf8PathBuf;
use rl_core::CoreError;

/// Errors that can occur during scanning operations.
///
/// # Examples
///
/// ```
/// use rl_scanner::ScanError;
///
/// fn describe(err: &ScanError) -> &'static str {
///     match err {
///         ScanError::InvalidPath { .. } => "cannot hash",
///         ScanError::Walk(_) => "listing failed",
///         ScanError::Read { .. } => "read failed",
///         ScanError::NonUtf8Path(_) => "non UTF-8 path",
///         ScanError::Catalog(_) => "bad catalog",
///     }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// A digest was requested for a path that is missing or is a directory.
    #[error("invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: Utf8PathBuf,
        /// Why the path cannot be hashed.
        reason: String,
    },

    /// Failed to list a directory.
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A path is not valid UTF-8.
    ///
    /// Uris are UTF-8 throughout; such a path cannot be catalogued.
    #[error("path is not valid UTF-8: {}", _0.display())]
    NonUtf8Path(std::path::PathBuf),

    /// The flattened tree violated a catalog invariant.
    #[error(transparent)]
    Catalog(#[from] CoreError),
}

impl ScanError {
    /// Creates a new [`ScanError::InvalidPath`] error.
    #[inline]
    pub fn invalid_path(path: impl Into<Utf8PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a new [`ScanError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::InvalidPath { path, .. } | Self::Read { path, .. } => Some(path),
            Self::Walk(_) | Self::NonUtf8Path(_) | Self::Catalog(_) => None,
        }
    }
}
