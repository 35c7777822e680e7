//! Content digests.
//!
//! Files are identified by a BLAKE3 digest of their full raw content,
//! hex-encoded. Identical bytes always produce the same [`ContentHash`],
//! regardless of name or location.

use std::fs::File;

use camino::Utf8Path;
use rl_core::ContentHash;

use crate::error::ScanError;

/// Digests an in-memory buffer.
///
/// # Examples
///
/// ```
/// use rl_scanner::hash_bytes;
///
/// assert_eq!(hash_bytes(b"export {}"), hash_bytes(b"export {}"));
/// assert_ne!(hash_bytes(b"a"), hash_bytes(b"b"));
/// assert_eq!(hash_bytes(b"").as_str().len(), 64);
/// ```
#[must_use]
pub fn hash_bytes(bytes: &[u8]) -> ContentHash {
    ContentHash::new(blake3::hash(bytes).to_hex().as_str())
}

/// Digests the file at `path`, streaming its content.
///
/// # Errors
///
/// Returns [`ScanError::InvalidPath`] if `path` does not exist or is a
/// directory, and [`ScanError::Read`] if the file cannot be read.
pub fn hash_file(path: &Utf8Path) -> Result<ContentHash, ScanError> {
    if !path.exists() {
        return Err(ScanError::invalid_path(path, "does not exist"));
    }
    if path.is_dir() {
        return Err(ScanError::invalid_path(path, "is a directory"));
    }

    let file = File::open(path).map_err(|e| ScanError::read(path, e))?;
    let mut hasher = blake3::Hasher::new();
    hasher
        .update_reader(file)
        .map_err(|e| ScanError::read(path, e))?;
    Ok(ContentHash::new(hasher.finalize().to_hex().as_str()))
}
