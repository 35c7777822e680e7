//! Snapshot statistics with atomic counters.
//!
//! [`ScanStats`] is shared by every branch of a (possibly parallel) snapshot
//! build; [`StatsSnapshot`] is the plain value handed to callers afterwards.
//! Counters use relaxed ordering: they are informational and nothing
//! synchronises on them.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Atomic counters for one snapshot build.
///
/// # Examples
///
/// ```
/// use rl_scanner::ScanStats;
///
/// let stats = ScanStats::new();
/// stats.record_file(120, true);
/// stats.record_directory();
///
/// let snap = stats.snapshot();
/// assert_eq!(snap.files, 1);
/// assert_eq!(snap.bytes_hashed, 120);
/// ```
#[derive(Debug, Default)]
pub struct ScanStats {
    /// Files hashed.
    files: AtomicU64,
    /// Directories entered.
    directories: AtomicU64,
    /// Files whose text was captured.
    text_files: AtomicU64,
    /// Total bytes fed to the hasher.
    bytes_hashed: AtomicU64,
    /// Symbolic links left out of the snapshot.
    links_skipped: AtomicU64,
}

impl ScanStats {
    /// Creates a new [`ScanStats`] with all counters at zero.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one hashed file of `bytes` length.
    #[inline]
    pub fn record_file(&self, bytes: u64, captured_text: bool) {
        self.files.fetch_add(1, Ordering::Relaxed);
        self.bytes_hashed.fetch_add(bytes, Ordering::Relaxed);
        if captured_text {
            self.text_files.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Counts one directory.
    #[inline]
    pub fn record_directory(&self) {
        self.directories.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts one symbolic link that was not followed.
    #[inline]
    pub fn record_skipped_link(&self) {
        self.links_skipped.fetch_add(1, Ordering::Relaxed);
    }

    /// Takes a point-in-time copy of the counters.
    #[must_use]
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            files: self.files.load(Ordering::Relaxed),
            directories: self.directories.load(Ordering::Relaxed),
            text_files: self.text_files.load(Ordering::Relaxed),
            bytes_hashed: self.bytes_hashed.load(Ordering::Relaxed),
            links_skipped: self.links_skipped.load(Ordering::Relaxed),
        }
    }
}

/// Plain copy of [`ScanStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Files hashed.
    pub files: u64,
    /// Directories entered (the scan root is not counted).
    pub directories: u64,
    /// Files whose text was captured.
    pub text_files: u64,
    /// Total bytes fed to the hasher.
    pub bytes_hashed: u64,
    /// Symbolic links left out of the snapshot.
    #[serde(default)]
    pub links_skipped: u64,
}

impl StatsSnapshot {
    /// Files plus directories: the length of the flattened catalog.
    #[inline]
    #[must_use]
    pub const fn entries(&self) -> u64 {
        self.files + self.directories
    }
}
