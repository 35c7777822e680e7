//! Per-key correspondence reports.
//!
//! Where the record functions resolve collisions silently, a report lists
//! every key seen in either catalog with an explicit [`Correspondence`].

use rl_core::{Catalog, Correspondence, MatchStrategy};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::warn;

use crate::index::{Candidate, FileIndex, MatchKey};

/// The correspondence found for one identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyReport {
    /// Digest or filename.
    pub key: String,
    /// What the key resolved to.
    #[serde(flatten)]
    pub outcome: Correspondence,
}

/// Reports every key of either catalog under `key`, sorted by key.
///
/// # Examples
///
/// ```
/// use rl_core::{Catalog, CatalogEntry, CatalogKind, ContentHash, FileEntry};
/// use rl_matcher::{MatchKey, correspond};
///
/// let file = |uri: &str| {
///     let name = uri.rsplit('/').next().unwrap_or(uri);
///     CatalogEntry {
///         name: name.to_owned(),
///         uri: uri.into(),
///         kind: CatalogKind::File(FileEntry::from_name(name, ContentHash::from(uri), None)),
///     }
/// };
///
/// let before = Catalog::new(vec![file("a/index.js"), file("b/index.js")])?;
/// let after = Catalog::new(vec![file("index.js")])?;
///
/// let report = correspond(&before, &after, MatchKey::Filename);
/// assert_eq!(report.len(), 1);
/// assert!(report[0].outcome.is_ambiguous());
/// # Ok::<(), rl_core::CoreError>(())
/// ```
#[must_use]
pub fn correspond(from: &Catalog, to: &Catalog, key: MatchKey) -> Vec<KeyReport> {
    let from_index = FileIndex::new(from, key);
    let to_index = FileIndex::new(to, key);

    let only_in_to = to_index.keys().filter(|k| from_index.get(k).is_empty());
    let mut reports: Vec<KeyReport> = from_index
        .keys()
        .chain(only_in_to)
        .map(|k| KeyReport {
            key: k.to_owned(),
            outcome: outcome(from_index.get(k), to_index.get(k)),
        })
        .collect();

    let ambiguous = reports.iter().filter(|r| r.outcome.is_ambiguous()).count();
    if ambiguous > 0 {
        warn!(?key, ambiguous, "Ambiguous correspondences found");
    }

    reports.sort_by(|a, b| a.key.cmp(&b.key));
    reports
}

/// [`correspond`] keyed by content digest.
#[must_use]
pub fn correspond_by_hash(from: &Catalog, to: &Catalog) -> Vec<KeyReport> {
    correspond(from, to, MatchKey::Hash)
}

/// [`correspond`] keyed by filename.
#[must_use]
pub fn correspond_by_filename(from: &Catalog, to: &Catalog) -> Vec<KeyReport> {
    correspond(from, to, MatchKey::Filename)
}

/// Only the ambiguous keys for the keys `strategy` matches on.
///
/// For [`MatchStrategy::Both`] digest reports come before filename reports.
#[must_use]
pub fn ambiguities(from: &Catalog, to: &Catalog, strategy: MatchStrategy) -> Vec<KeyReport> {
    let keys: &[MatchKey] = match strategy {
        MatchStrategy::Hash => &[MatchKey::Hash],
        MatchStrategy::Filename => &[MatchKey::Filename],
        MatchStrategy::Both => &[MatchKey::Hash, MatchKey::Filename],
    };

    keys.iter()
        .flat_map(|&key| correspond(from, to, key))
        .filter(|report| report.outcome.is_ambiguous())
        .collect()
}

fn outcome(from: &[Candidate<'_>], to: &[Candidate<'_>]) -> Correspondence {
    match (from, to) {
        ([], _) | (_, []) => Correspondence::NoMatch,
        ([(source, _)], [(target, _)]) => Correspondence::Unique {
            from: source.uri.clone(),
            to: target.uri.clone(),
        },
        _ => Correspondence::Ambiguous {
            from: uris(from),
            to: uris(to),
        },
    }
}

fn uris(candidates: &[Candidate<'_>]) -> SmallVec<[camino::Utf8PathBuf; 2]> {
    candidates.iter().map(|(entry, _)| entry.uri.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::catalog;

    #[test]
    fn test_every_key_reported() {
        let before = catalog(&[("a.js", "h1"), ("b.js", "h2")]);
        let after = catalog(&[("lib/a.js", "h1"), ("c.js", "h3")]);

        let report = correspond_by_hash(&before, &after);
        let keys: Vec<_> = report.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["h1", "h2", "h3"]);

        assert_eq!(
            report[0].outcome,
            Correspondence::Unique {
                from: "a.js".into(),
                to: "lib/a.js".into(),
            }
        );
        assert_eq!(report[1].outcome, Correspondence::NoMatch);
        assert_eq!(report[2].outcome, Correspondence::NoMatch);
    }

    #[test]
    fn test_hash_duplicates_surface_as_ambiguous() {
        let before = catalog(&[("a/copy.js", "h1"), ("b/copy.js", "h1")]);
        let after = catalog(&[("c/copy.js", "h1")]);

        let report = correspond_by_hash(&before, &after);
        assert_eq!(report.len(), 1);
        match &report[0].outcome {
            Correspondence::Ambiguous { from, to } => {
                assert_eq!(from.as_slice(), ["a/copy.js", "b/copy.js"]);
                assert_eq!(to.as_slice(), ["c/copy.js"]);
            }
            other => panic!("expected ambiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_on_one_side_only_is_no_match() {
        let before = catalog(&[("a/index.js", "h1"), ("b/index.js", "h2")]);
        let after = catalog(&[("util.js", "h3")]);

        let report = correspond_by_filename(&before, &after);
        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|r| r.outcome == Correspondence::NoMatch));
    }

    #[test]
    fn test_ambiguities_for_both() {
        let before = catalog(&[("a/index.js", "h1"), ("b/index.js", "h1")]);
        let after = catalog(&[("index.js", "h1")]);

        let found = ambiguities(&before, &after, MatchStrategy::Both);
        let keys: Vec<_> = found.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["h1", "index"]);
        assert!(ambiguities(&after, &after, MatchStrategy::Hash).is_empty());
    }

    #[test]
    fn test_report_json() {
        let before = catalog(&[("a/index.js", "h1"), ("b/index.js", "h2")]);
        let after = catalog(&[("index.js", "h1")]);

        let report = correspond_by_filename(&before, &after);
        insta::assert_json_snapshot!(report[0], @r#"
        {
          "key": "index",
          "outcome": "ambiguous",
          "from": [
            "a/index.js",
            "b/index.js"
          ],
          "to": [
            "index.js"
          ]
        }
        "#);
    }
}
