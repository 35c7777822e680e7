//! Fast hash map and hash set type aliases.
//!
//! The matcher and the edit planner build several short-lived indexes keyed by
//! content digests, filenames and uris. All of those keys are strings, which is
//! the case the Fx hash from `rustc-hash` is fastest at. None of the indexes are
//! exposed to untrusted input, so DoS resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use rl_core::{FxHashMap, FxHashSet, fx_hash_map_with_capacity, fx_hash_set_with_capacity};
//!
//! let mut by_filename: FxHashMap<&str, usize> = fx_hash_map_with_capacity(4);
//! *by_filename.entry("util").or_default() += 1;
//! assert_eq!(by_filename["util"], 1);
//!
//! let seen: FxHashSet<&str> = fx_hash_set_with_capacity(4);
//! assert!(seen.is_empty());
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// The hasher used by [`FxHashMap`] and [`FxHashSet`].
pub type FxBuildHasher = rustc_hash::FxBuildHasher;

/// Creates a new [`FxHashMap`] sized for `capacity` entries.
///
/// Catalog indexes know their size up front (one slot per file entry), so
/// pre-sizing avoids rehashing while the index is built.
///
/// # Examples
///
/// ```
/// use rl_core::fx_hash_map_with_capacity;
///
/// let map: rl_core::FxHashMap<String, usize> = fx_hash_map_with_capacity(64);
/// assert!(map.capacity() >= 64);
/// ```
#[inline]
#[must_use]
pub fn fx_hash_map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default())
}

/// Creates a new [`FxHashSet`] sized for `capacity` entries.
#[inline]
#[must_use]
pub fn fx_hash_set_with_capacity<V>(capacity: usize) -> FxHashSet<V> {
    FxHashSet::with_capacity_and_hasher(capacity, FxBuildHasher::default())
}
