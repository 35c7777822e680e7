//! Migration record production.

use camino::Utf8Path;
use rl_core::{Catalog, FxHashSet, MatchStrategy, MigrationRecord, fx_hash_set_with_capacity};
use tracing::{debug, info, warn};

use crate::index::{Candidate, FileIndex, MatchKey};

/// Pairs files whose content digests are equal.
///
/// For every digest present in both catalogs one record pairs the first file
/// carrying it on each side. Later files with the same digest are left out of
/// the records; [`correspond_by_hash`](crate::correspond_by_hash) reports them.
///
/// # Examples
///
/// ```
/// use rl_core::{Catalog, CatalogEntry, CatalogKind, ContentHash, FileEntry};
/// use rl_matcher::match_by_hash;
///
/// let file = |uri: &str| {
///     let name = uri.rsplit('/').next().unwrap_or(uri);
///     CatalogEntry {
///         name: name.to_owned(),
///         uri: uri.into(),
///         kind: CatalogKind::File(FileEntry::from_name(name, ContentHash::from("h1"), None)),
///     }
/// };
///
/// let before = Catalog::new(vec![file("src/util.js")])?;
/// let after = Catalog::new(vec![file("src/lib/util.js")])?;
///
/// let records = match_by_hash(&before, &after);
/// assert_eq!(records.len(), 1);
/// assert!(records[0].migrated);
/// assert!(!records[0].modified);
/// # Ok::<(), rl_core::CoreError>(())
/// ```
#[must_use]
pub fn match_by_hash(from: &Catalog, to: &Catalog) -> Vec<MigrationRecord> {
    let from_index = FileIndex::new(from, MatchKey::Hash);
    let to_index = FileIndex::new(to, MatchKey::Hash);

    let mut records = Vec::new();
    let mut collisions = 0usize;

    for hash in from_index.keys() {
        let (Some(source), Some(target)) = (from_index.first(hash), to_index.first(hash)) else {
            continue;
        };
        if from_index.is_duplicated(hash) || to_index.is_duplicated(hash) {
            collisions += 1;
        }
        records.push(record(source, target));
    }

    if collisions > 0 {
        warn!(
            collisions,
            "Shared digests with several candidates were paired by first occurrence"
        );
    }

    sort_records(&mut records);
    info!(
        from = from.len(),
        to = to.len(),
        records = records.len(),
        "Matched catalogs by hash"
    );
    records
}

/// Pairs files whose filename (name without extension) is equal.
///
/// Only filenames that occur exactly once in each catalog are considered; a
/// filename shared by two files of the same catalog never yields a record,
/// even if the other catalog has a single candidate.
#[must_use]
pub fn match_by_filename(from: &Catalog, to: &Catalog) -> Vec<MigrationRecord> {
    let from_index = FileIndex::new(from, MatchKey::Filename);
    let to_index = FileIndex::new(to, MatchKey::Filename);

    let mut records = Vec::new();
    let mut excluded = 0usize;

    for filename in from_index.keys() {
        if to_index.get(filename).is_empty() {
            continue;
        }
        match (from_index.unique(filename), to_index.unique(filename)) {
            (Some(source), Some(target)) => records.push(record(source, target)),
            _ => {
                debug!(filename, "Filename is ambiguous, not paired");
                excluded += 1;
            }
        }
    }

    if excluded > 0 {
        warn!(excluded, "Shared filenames with several candidates were left unpaired");
    }

    sort_records(&mut records);
    info!(
        from = from.len(),
        to = to.len(),
        records = records.len(),
        "Matched catalogs by filename"
    );
    records
}

/// Runs the matching strategy selected by `strategy`.
///
/// With [`MatchStrategy::Both`], hash records come first and a filename
/// record is only added when neither its "from" nor its "to" path is already
/// claimed by a hash record, so every file appears in at most one record.
#[must_use]
pub fn match_catalogs(from: &Catalog, to: &Catalog, strategy: MatchStrategy) -> Vec<MigrationRecord> {
    match strategy {
        MatchStrategy::Hash => match_by_hash(from, to),
        MatchStrategy::Filename => match_by_filename(from, to),
        MatchStrategy::Both => {
            let mut records = match_by_hash(from, to);

            let mut claimed_from: FxHashSet<&Utf8Path> = fx_hash_set_with_capacity(records.len());
            let mut claimed_to: FxHashSet<&Utf8Path> = fx_hash_set_with_capacity(records.len());
            for r in &records {
                claimed_from.insert(r.from_path.as_path());
                claimed_to.insert(r.to_path.as_path());
            }
            let extra: Vec<_> = match_by_filename(from, to)
                .into_iter()
                .filter(|r| {
                    !claimed_from.contains(r.from_path.as_path())
                        && !claimed_to.contains(r.to_path.as_path())
                })
                .collect();

            debug!(extra = extra.len(), "Filename records added to hash records");
            records.extend(extra);
            sort_records(&mut records);
            records
        }
    }
}

fn record((from_entry, from_file): Candidate<'_>, (to_entry, to_file): Candidate<'_>) -> MigrationRecord {
    let record = MigrationRecord::between(
        from_entry.name.as_str(),
        (from_entry.uri.as_path(), from_file),
        (to_entry.uri.as_path(), to_file),
    );
    debug!(
        from = %record.from_path,
        to = %record.to_path,
        migrated = record.migrated,
        modified = record.modified,
        "Paired files"
    );
    record
}

fn sort_records(records: &mut [MigrationRecord]) {
    records.sort_by(|a, b| a.from_path.cmp(&b.from_path));
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::catalog;

    fn pairs(records: &[MigrationRecord]) -> Vec<(String, String)> {
        records
            .iter()
            .map(|r| (r.from_path.to_string(), r.to_path.to_string()))
            .collect()
    }

    #[test]
    fn test_hash_detects_move() {
        let before = catalog(&[("src/util.js", "h1")]);
        let after = catalog(&[("src/lib/util.js", "h1")]);

        let records = match_by_hash(&before, &after);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.from_path, "src/util.js");
        assert_eq!(record.to_path, "src/lib/util.js");
        assert!(record.migrated);
        assert!(!record.modified);
        assert_eq!(record.name, "util.js");
    }

    #[test]
    fn test_hash_is_symmetric() {
        let a = catalog(&[("a.js", "h1"), ("b.js", "h2"), ("c.js", "h3")]);
        let b = catalog(&[("x/c.js", "h3"), ("x/a.js", "h1"), ("x/e.js", "h9")]);

        let mut forward = pairs(&match_by_hash(&a, &b));
        let mut backward: Vec<_> = pairs(&match_by_hash(&b, &a))
            .into_iter()
            .map(|(from, to)| (to, from))
            .collect();
        forward.sort_unstable();
        backward.sort_unstable();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 2);
    }

    #[test]
    fn test_hash_pairs_first_occurrence() {
        let before = catalog(&[("a/copy.js", "h1"), ("b/copy.js", "h1")]);
        let after = catalog(&[("c/copy.js", "h1")]);

        let records = match_by_hash(&before, &after);
        assert_eq!(pairs(&records), vec![("a/copy.js".to_owned(), "c/copy.js".to_owned())]);
    }

    #[test]
    fn test_hash_ignores_directories_and_empty_intersection() {
        let before = catalog(&[("src/", ""), ("src/a.js", "h1")]);
        let after = catalog(&[("src/", ""), ("src/a.js", "h2")]);
        assert!(match_by_hash(&before, &after).is_empty());
    }

    #[test]
    fn test_filename_detects_edit() {
        let before = catalog(&[("src/util.js", "h1")]);
        let after = catalog(&[("src/util.ts", "h2")]);

        let records = match_by_filename(&before, &after);
        assert_eq!(records.len(), 1);
        assert!(records[0].modified);
        assert!(records[0].migrated);
    }

    #[test]
    fn test_filename_excludes_duplicates_within_catalog() {
        let before = catalog(&[("a/index.js", "h1"), ("b/index.js", "h2"), ("util.js", "h3")]);
        let after = catalog(&[("index.js", "h1"), ("lib/util.js", "h3")]);

        // index is unique in `after` but duplicated in `before`
        let records = match_by_filename(&before, &after);
        assert_eq!(pairs(&records), vec![("util.js".to_owned(), "lib/util.js".to_owned())]);
    }

    #[test]
    fn test_both_prefers_hash_records() {
        let before = catalog(&[("a.js", "h1"), ("b.js", "h2")]);
        let after = catalog(&[("lib/renamed.js", "h1"), ("lib/b.js", "h3"), ("lib/a.js", "h4")]);

        let records = match_catalogs(&before, &after, MatchStrategy::Both);
        assert_eq!(
            pairs(&records),
            vec![
                ("a.js".to_owned(), "lib/renamed.js".to_owned()),
                ("b.js".to_owned(), "lib/b.js".to_owned()),
            ]
        );
    }

    #[test]
    fn test_both_never_reuses_a_hash_claimed_target() {
        let before = catalog(&[("x/util.js", "h1"), ("y/helper.js", "h2")]);
        let after = catalog(&[("z/helper.js", "h1")]);

        let records = match_catalogs(&before, &after, MatchStrategy::Both);
        assert_eq!(pairs(&records), vec![("x/util.js".to_owned(), "z/helper.js".to_owned())]);
        assert_eq!(
            records.iter().filter(|r| r.to_path == "z/helper.js").count(),
            1
        );
    }

    #[test]
    fn test_records_sorted_by_from_path() {
        let before = catalog(&[("z.js", "h1"), ("m.js", "h2"), ("a.js", "h3")]);
        let after = catalog(&[("a.js", "h3"), ("m.js", "h2"), ("z.js", "h1")]);

        let records = match_catalogs(&before, &after, MatchStrategy::Hash);
        let from: Vec<_> = records.iter().map(|r| r.from_path.as_str()).collect();
        assert_eq!(from, vec!["a.js", "m.js", "z.js"]);
        assert!(records.iter().all(MigrationRecord::is_unchanged));
    }
}
