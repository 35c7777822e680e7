//! Per-catalog file indexes.
//!
//! A [`FileIndex`] groups the file entries of one catalog by an identity key.
//! Groups keep catalog order, and the index remembers the order in which keys
//! were first seen so that iteration is deterministic.

use rl_core::{Catalog, CatalogEntry, FileEntry, FxHashMap, fx_hash_map_with_capacity};
use smallvec::SmallVec;

/// Identity used to decide that two files are "the same".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKey {
    /// Content digest.
    Hash,
    /// Name without extension.
    Filename,
}

impl MatchKey {
    /// Extracts this key from a file entry.
    #[inline]
    #[must_use]
    pub fn of(self, file: &FileEntry) -> &str {
        match self {
            Self::Hash => file.hash.as_str(),
            Self::Filename => &file.filename,
        }
    }
}

/// A file entry together with its catalog node.
pub(crate) type Candidate<'a> = (&'a CatalogEntry, &'a FileEntry);

/// File entries of one catalog grouped by key.
pub(crate) struct FileIndex<'a> {
    groups: FxHashMap<&'a str, SmallVec<[Candidate<'a>; 2]>>,
    keys: Vec<&'a str>,
}

impl<'a> FileIndex<'a> {
    /// Indexes every file of `catalog` under `key`. Directories are skipped.
    pub(crate) fn new(catalog: &'a Catalog, key: MatchKey) -> Self {
        let mut groups: FxHashMap<&'a str, SmallVec<[Candidate<'a>; 2]>> =
            fx_hash_map_with_capacity(catalog.len());
        let mut keys = Vec::new();

        for (entry, file) in catalog.files() {
            let k = key.of(file);
            groups
                .entry(k)
                .or_insert_with(|| {
                    keys.push(k);
                    SmallVec::new()
                })
                .push((entry, file));
        }

        Self { groups, keys }
    }

    /// Keys in first-seen catalog order.
    pub(crate) fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.keys.iter().copied()
    }

    /// All candidates for `key`, in catalog order.
    pub(crate) fn get(&self, key: &str) -> &[Candidate<'a>] {
        self.groups.get(key).map_or(&[], SmallVec::as_slice)
    }

    /// The first candidate for `key`.
    pub(crate) fn first(&self, key: &str) -> Option<Candidate<'a>> {
        self.get(key).first().copied()
    }

    /// The candidate for `key` if there is exactly one.
    pub(crate) fn unique(&self, key: &str) -> Option<Candidate<'a>> {
        match self.get(key) {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// Returns `true` if `key` is shared by more than one file.
    pub(crate) fn is_duplicated(&self, key: &str) -> bool {
        self.get(key).len() > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::catalog;

    #[test]
    fn test_groups_in_catalog_order() {
        let cat = catalog(&[("a/index.js", "h1"), ("b/index.ts", "h2"), ("util.js", "h1")]);

        let by_hash = FileIndex::new(&cat, MatchKey::Hash);
        assert_eq!(by_hash.keys().collect::<Vec<_>>(), vec!["h1", "h2"]);
        assert_eq!(by_hash.first("h1").unwrap().0.uri, "a/index.js");
        assert!(by_hash.unique("h1").is_none());
        assert!(by_hash.unique("h2").is_some());

        let by_name = FileIndex::new(&cat, MatchKey::Filename);
        assert!(by_name.is_duplicated("index"));
        assert!(!by_name.is_duplicated("util"));
        assert!(by_name.get("missing").is_empty());
    }

    #[test]
    fn test_directories_are_not_indexed() {
        let cat = catalog(&[("src/", ""), ("src/a.js", "h1")]);
        let index = FileIndex::new(&cat, MatchKey::Filename);
        assert_eq!(index.keys().count(), 1);
    }
}
