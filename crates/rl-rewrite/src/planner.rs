//! Edit planning and whole-catalog rewriting.
//!
//! # Design
//!
//! [`EditPlanner`] indexes migration records by their extension-stripped
//! `from_path`, so an import written with or without its source extension
//! finds the same record. For one file it turns each located reference into
//! at most one [`Edit`]:
//!
//! - relative literals resolve against the file's previous directory and are
//!   re-expressed relative to its current directory
//! - absolute literals resolve against the snapshot root and keep their style
//! - library literals are never touched
//!
//! [`Rewriter`] drives extraction, planning and application over every text
//! file of an "after" catalog.

use camino::{Utf8Path, Utf8PathBuf};
use rl_core::{
    Catalog, Edit, FxHashMap, MigrationRecord, Reference, RewriteConfig, fx_hash_map_with_capacity,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::classify;
use crate::edit::apply_edits;
use crate::error::RewriteError;
use crate::extract::{PatternExtractor, ReferenceExtractor};
use crate::resolve::{
    has_resolvable_extension, join_relative, normalize, parent_dir, relative_path,
    strip_resolvable_extension,
};

/// Plans reference edits for files that moved or whose imports moved.
///
/// # Examples
///
/// ```
/// use rl_core::{ContentHash, FileEntry, MigrationRecord, Reference, RewriteConfig};
/// use rl_rewrite::EditPlanner;
/// use camino::Utf8Path;
///
/// let util = FileEntry::from_name("util.js", ContentHash::from("h1"), None);
/// let records = [MigrationRecord::between(
///     "util.js",
///     (Utf8Path::new("src/util.js"), &util),
///     (Utf8Path::new("src/lib/util.js"), &util),
/// )];
///
/// let config = RewriteConfig::default();
/// let planner = EditPlanner::new(&records, &config);
/// let edits = planner.plan(
///     Utf8Path::new("src/index.js"),
///     Utf8Path::new("src/index.js"),
///     vec![Reference::new("./util", 19)],
/// );
///
/// assert_eq!(edits.len(), 1);
/// assert_eq!(edits[0].replacement, "./lib/util");
/// ```
#[derive(Debug)]
pub struct EditPlanner<'a> {
    /// Records keyed by extension-stripped `from_path`.
    moves: FxHashMap<&'a str, &'a MigrationRecord>,
    config: &'a RewriteConfig,
}

impl<'a> EditPlanner<'a> {
    /// Indexes `records`. If two records strip to the same key, the first wins.
    #[must_use]
    pub fn new(records: &'a [MigrationRecord], config: &'a RewriteConfig) -> Self {
        let mut moves = fx_hash_map_with_capacity(records.len());
        for record in records {
            let key = strip_resolvable_extension(record.from_path.as_str(), &config.resolvable_extensions);
            moves.entry(key).or_insert(record);
        }
        Self { moves, config }
    }

    /// Plans edits for one file, given its previous and current uri.
    ///
    /// Edits are returned in ascending `start` order and never include a
    /// replacement equal to the original literal.
    #[must_use]
    pub fn plan(&self, file_from: &Utf8Path, file_to: &Utf8Path, references: Vec<Reference>) -> Vec<Edit> {
        let group = classify(references, &self.config.excluded_marker);
        let file_moved = file_from != file_to;

        let mut edits: Vec<Edit> = group
            .relative
            .iter()
            .filter_map(|r| self.plan_relative(r, file_from, file_to, file_moved))
            .chain(group.absolute.iter().filter_map(|r| self.plan_absolute(r)))
            .filter(|edit| edit.replacement != edit.original)
            .collect();

        edits.sort_by_key(|edit| edit.start);
        if !edits.is_empty() {
            debug!(file = %file_to, edits = edits.len(), library = group.library.len(), "Planned edits");
        }
        edits
    }

    fn plan_relative(
        &self,
        reference: &Reference,
        file_from: &Utf8Path,
        file_to: &Utf8Path,
        file_moved: bool,
    ) -> Option<Edit> {
        let target = join_relative(parent_dir(file_from), &reference.literal);
        let record = self.lookup(target.as_str()).filter(|record| record.migrated);

        let new_target: &Utf8Path = match record {
            Some(record) => &record.to_path,
            None if file_moved => &target,
            None => return None,
        };

        let replacement = relative_path(parent_dir(file_to), &self.styled(new_target, &reference.literal));
        Some(Edit::replace(reference, replacement))
    }

    fn plan_absolute(&self, reference: &Reference) -> Option<Edit> {
        let (root, path) = match reference.literal.strip_prefix('/') {
            Some(rest) => ("/", rest),
            None => ("", reference.literal.as_str()),
        };

        let target = normalize(Utf8Path::new(path));
        let record = self.lookup(target.as_str()).filter(|record| record.migrated)?;

        let replacement = format!("{root}{}", self.styled(&record.to_path, &reference.literal));
        Some(Edit::replace(reference, replacement))
    }

    fn lookup(&self, target: &str) -> Option<&'a MigrationRecord> {
        let key = strip_resolvable_extension(target, &self.config.resolvable_extensions);
        self.moves.get(key).copied()
    }

    /// Drops the extension from `path` unless `literal` was written with one.
    fn styled(&self, path: &Utf8Path, literal: &str) -> Utf8PathBuf {
        let extensions = &self.config.resolvable_extensions;
        if has_resolvable_extension(literal, extensions) {
            path.to_owned()
        } else {
            Utf8PathBuf::from(strip_resolvable_extension(path.as_str(), extensions))
        }
    }
}

/// A text file whose references were rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchedFile {
    /// Uri in the "after" catalog.
    pub uri: Utf8PathBuf,

    /// Uri the file had in the "before" catalog.
    pub previous_uri: Utf8PathBuf,

    /// Edits applied, in ascending `start` order.
    pub edits: Vec<Edit>,

    /// The patched text.
    pub content: String,
}

/// Rewrites the references of every text file in a catalog.
///
/// Patched content is returned, never written to disk.
#[derive(Debug, Clone)]
pub struct Rewriter<E = PatternExtractor> {
    extractor: E,
    config: RewriteConfig,
}

impl Rewriter<PatternExtractor> {
    /// Creates a rewriter whose extractor uses the configured pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern is unusable.
    pub fn new(config: RewriteConfig) -> Result<Self, RewriteError> {
        let extractor = PatternExtractor::from_config(&config)?;
        Ok(Self { extractor, config })
    }
}

impl<E: ReferenceExtractor> Rewriter<E> {
    /// Creates a rewriter with a custom extractor.
    pub fn with_extractor(extractor: E, config: RewriteConfig) -> Self {
        Self { extractor, config }
    }

    /// Rewrites one file's content.
    ///
    /// Returns `Ok(None)` if nothing needs to change.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::InvalidInput`] if a planned edit does not fit
    /// the content.
    pub fn rewrite_file(
        &self,
        file_from: &Utf8Path,
        file_to: &Utf8Path,
        content: &str,
        records: &[MigrationRecord],
    ) -> Result<Option<PatchedFile>, RewriteError> {
        let planner = EditPlanner::new(records, &self.config);
        self.rewrite_with(&planner, file_from, file_to, content)
    }

    /// Rewrites every file of `after` that has captured text.
    ///
    /// A file's previous uri is the `from_path` of the record whose `to_path`
    /// is the file's uri; files without such a record are assumed not to have
    /// moved.
    ///
    /// # Errors
    ///
    /// Stops at the first file whose edits do not fit its content.
    pub fn rewrite_catalog(
        &self,
        after: &Catalog,
        records: &[MigrationRecord],
    ) -> Result<Vec<PatchedFile>, RewriteError> {
        let planner = EditPlanner::new(records, &self.config);

        let mut previous: FxHashMap<&Utf8Path, &Utf8Path> = fx_hash_map_with_capacity(records.len());
        for record in records {
            previous
                .entry(record.to_path.as_path())
                .or_insert(record.from_path.as_path());
        }

        let mut patched = Vec::new();
        for (entry, file) in after.files() {
            let Some(content) = file.content.as_deref() else {
                continue;
            };
            let file_to = entry.uri.as_path();
            let file_from = previous.get(file_to).copied().unwrap_or(file_to);

            if let Some(file) = self.rewrite_with(&planner, file_from, file_to, content)? {
                patched.push(file);
            }
        }

        info!(
            files = after.files().count(),
            patched = patched.len(),
            "Rewrote catalog references"
        );
        Ok(patched)
    }

    fn rewrite_with(
        &self,
        planner: &EditPlanner<'_>,
        file_from: &Utf8Path,
        file_to: &Utf8Path,
        content: &str,
    ) -> Result<Option<PatchedFile>, RewriteError> {
        let references = self.extractor.extract(content);
        let edits = planner.plan(file_from, file_to, references);
        if edits.is_empty() {
            return Ok(None);
        }

        let content = apply_edits(content, &edits)?;
        Ok(Some(PatchedFile {
            uri: file_to.to_owned(),
            previous_uri: file_from.to_owned(),
            edits,
            content,
        }))
    }
}
