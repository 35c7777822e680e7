//! Recursive snapshot construction.
//!
//! [`SnapshotBuilder`] walks a directory depth-first and produces a [`Tree`]
//! in which every file carries its extension, filename, content digest and,
//! for allowlisted text types, its text.
//!
//! # Design
//!
//! Each directory is listed with [`DirLister`], then its children are visited
//! in listing order. With [`ScanConfig::parallel`] set, sibling children are
//! visited on the rayon pool instead; `collect` keeps listing order, and
//! nothing downstream depends on catalog order beyond that.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use rayon::prelude::*;
use rl_core::{FileEntry, ScanConfig, Tree, TreeEntry, TreeKind};
use tracing::{debug, info};

use crate::digest::hash_bytes;
use crate::error::ScanError;
use crate::stats::{ScanStats, StatsSnapshot};
use crate::walker::{DirLister, Listed};

/// Builds snapshot trees from directories.
///
/// # Examples
///
/// ```no_run
/// use rl_core::ScanConfig;
/// use rl_scanner::SnapshotBuilder;
/// use camino::Utf8Path;
///
/// let builder = SnapshotBuilder::new(ScanConfig::default());
/// match builder.build(Utf8Path::new("./before"))? {
///     Some(tree) => println!("{} top-level entries", tree.len()),
///     None => println!("nothing to scan"),
/// }
/// # Ok::<(), rl_scanner::ScanError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SnapshotBuilder {
    /// Scan configuration.
    config: ScanConfig,
    /// Lister configured with the ignore list.
    lister: DirLister,
}

/// Borrowed state shared by every level of one build.
struct Walk<'a> {
    base: &'a Utf8Path,
    stats: &'a ScanStats,
}

impl SnapshotBuilder {
    /// Creates a builder with the given configuration.
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        let lister = DirLister::new(&config.ignore);
        Self { config, lister }
    }

    /// Snapshots `root`.
    ///
    /// Returns `Ok(None)` if `root` is missing or not a directory.
    ///
    /// # Errors
    ///
    /// Any listing or read failure aborts the whole scan.
    pub fn build(&self, root: &Utf8Path) -> Result<Option<Tree>, ScanError> {
        Ok(self.build_with_stats(root)?.map(|(tree, _)| tree))
    }

    /// Snapshots `root` and reports what was visited.
    pub fn build_with_stats(
        &self,
        root: &Utf8Path,
    ) -> Result<Option<(Tree, StatsSnapshot)>, ScanError> {
        if !root.is_dir() {
            debug!(root = %root, "Scan root is not a directory, nothing to scan");
            return Ok(None);
        }

        let base = self.config.root_dir.as_deref().unwrap_or(root);
        info!(root = %root, base = %base, parallel = self.config.parallel, "Starting snapshot");

        let stats = ScanStats::new();
        let walk = Walk {
            base,
            stats: &stats,
        };
        let tree = self.scan_dir(root, &walk)?;

        let snapshot = stats.snapshot();
        info!(
            files = snapshot.files,
            directories = snapshot.directories,
            text_files = snapshot.text_files,
            bytes = snapshot.bytes_hashed,
            links_skipped = snapshot.links_skipped,
            "Snapshot completed"
        );

        Ok(Some((tree, snapshot)))
    }

    /// Returns the builder configuration.
    #[must_use]
    pub const fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Lists `dir` and turns every child except symbolic links into a tree entry.
    fn scan_dir(&self, dir: &Utf8Path, walk: &Walk<'_>) -> Result<Tree, ScanError> {
        let children: Vec<Listed> = self
            .lister
            .list(dir)?
            .into_iter()
            .filter(|child| {
                if child.is_symlink {
                    info!(path = %child.path, "Leaving symbolic link out of snapshot");
                    walk.stats.record_skipped_link();
                }
                !child.is_symlink
            })
            .collect();

        if self.config.parallel {
            children
                .par_iter()
                .map(|child| self.scan_child(child, walk))
                .collect()
        } else {
            children
                .iter()
                .map(|child| self.scan_child(child, walk))
                .collect()
        }
    }

    fn scan_child(&self, child: &Listed, walk: &Walk<'_>) -> Result<TreeEntry, ScanError> {
        let uri = relative_uri(&child.path, walk.base)?;

        if child.is_dir {
            walk.stats.record_directory();
            let children = self.scan_dir(&child.path, walk)?;
            return Ok(TreeEntry {
                name: child.name.clone(),
                uri,
                kind: TreeKind::Directory { children },
            });
        }

        let file = self.scan_file(child, walk.stats)?;
        debug!(uri = %uri, hash = %file.hash, text = file.has_content(), "Hashed file");
        Ok(TreeEntry {
            name: child.name.clone(),
            uri,
            kind: TreeKind::File(file),
        })
    }

    /// Reads a file once, digests it and captures text if allowlisted.
    fn scan_file(&self, child: &Listed, stats: &ScanStats) -> Result<FileEntry, ScanError> {
        let bytes = fs::read(&child.path).map_err(|e| ScanError::read(&child.path, e))?;
        let hash = hash_bytes(&bytes);
        let len = bytes.len() as u64;

        let mut file = FileEntry::from_name(&child.name, hash, None);
        let wants_text = file
            .extension
            .as_deref()
            .is_some_and(|ext| self.config.is_text_extension(ext));

        if wants_text {
            match String::from_utf8(bytes) {
                Ok(text) => file.content = Some(text),
                Err(_) => debug!(path = %child.path, "Text-type file is not UTF-8, content omitted"),
            }
        }

        stats.record_file(len, file.has_content());
        Ok(file)
    }
}

/// Computes the `/`-separated uri of `path` relative to `base`.
fn relative_uri(path: &Utf8Path, base: &Utf8Path) -> Result<Utf8PathBuf, ScanError> {
    let relative = path
        .strip_prefix(base)
        .map_err(|_| ScanError::invalid_path(path, format!("is not under root directory {base}")))?;

    let joined = relative
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/");
    Ok(Utf8PathBuf::from(joined))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/lib")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::write(root.join("src/util.js"), "export const x = 1;\n").unwrap();
        fs::write(root.join("src/lib/math.ts"), "export {};\n").unwrap();
        fs::write(root.join("src/logo.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "").unwrap();
        dir
    }

    fn find<'a>(tree: &'a [TreeEntry], name: &str) -> &'a TreeEntry {
        tree.iter().find(|e| e.name == name).unwrap()
    }

    fn children(entry: &TreeEntry) -> &[TreeEntry] {
        match &entry.kind {
            TreeKind::Directory { children } => children,
            TreeKind::File(_) => panic!("{} is a file", entry.uri),
        }
    }

    fn file(entry: &TreeEntry) -> &FileEntry {
        match &entry.kind {
            TreeKind::File(file) => file,
            TreeKind::Directory { .. } => panic!("{} is a directory", entry.uri),
        }
    }

    #[test]
    fn test_build_nested_tree() {
        let dir = fixture();
        let root = Utf8Path::from_path(dir.path()).unwrap();

        let (tree, stats) = SnapshotBuilder::new(ScanConfig::default())
            .build_with_stats(root)
            .unwrap()
            .unwrap();

        // node_modules is ignored by default
        assert_eq!(tree.len(), 1);
        let src = find(&tree, "src");
        assert_eq!(src.uri, "src");

        let util = find(children(src), "util.js");
        assert_eq!(util.uri, "src/util.js");
        let util = file(util);
        assert_eq!(util.filename, "util");
        assert_eq!(util.extension.as_deref(), Some("js"));
        assert_eq!(util.hash, hash_bytes(b"export const x = 1;\n"));
        assert_eq!(util.content.as_deref(), Some("export const x = 1;\n"));

        let lib = find(children(src), "lib");
        assert_eq!(find(children(lib), "math.ts").uri, "src/lib/math.ts");

        assert_eq!(stats.files, 3);
        assert_eq!(stats.directories, 2);
        assert_eq!(stats.text_files, 2);
    }

    #[test]
    fn test_binary_content_not_captured() {
        let dir = fixture();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        let tree = SnapshotBuilder::new(ScanConfig::default())
            .build(root)
            .unwrap()
            .unwrap();

        let logo = file(find(children(find(&tree, "src")), "logo.png"));
        assert!(logo.content.is_none());
        assert_eq!(logo.hash, hash_bytes(&[0x89, 0x50, 0x4e, 0x47]));
    }

    #[test]
    fn test_missing_root_is_none() {
        let builder = SnapshotBuilder::new(ScanConfig::default());
        assert!(
            builder
                .build(Utf8Path::new("/nonexistent/relink/root"))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_file_root_is_none() {
        let dir = fixture();
        let file = dir.path().join("src/util.js");
        let builder = SnapshotBuilder::new(ScanConfig::default());
        assert!(builder.build(Utf8Path::from_path(&file).unwrap()).unwrap().is_none());
    }

    #[test]
    fn test_root_dir_prefixes_uris() {
        let dir = fixture();
        let base = Utf8Path::from_path(dir.path()).unwrap();
        let config = ScanConfig {
            root_dir: Some(base.to_owned()),
            ..ScanConfig::default()
        };

        let tree = SnapshotBuilder::new(config)
            .build(&base.join("src"))
            .unwrap()
            .unwrap();
        assert_eq!(find(&tree, "util.js").uri, "src/util.js");
    }

    #[test]
    fn test_root_dir_must_contain_root() {
        let dir = fixture();
        let other = tempfile::tempdir().unwrap();
        let config = ScanConfig {
            root_dir: Some(Utf8Path::from_path(other.path()).unwrap().to_owned()),
            ..ScanConfig::default()
        };

        let err = SnapshotBuilder::new(config)
            .build(Utf8Path::from_path(dir.path()).unwrap())
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidPath { .. }));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = fixture();
        let root = Utf8Path::from_path(dir.path()).unwrap();

        let sequential = SnapshotBuilder::new(ScanConfig::default())
            .build(root)
            .unwrap()
            .unwrap();
        let parallel = SnapshotBuilder::new(ScanConfig {
            parallel: true,
            ..ScanConfig::default()
        })
        .build(root)
        .unwrap()
        .unwrap();

        let count = |tree: &Tree| tree.iter().map(TreeEntry::count).sum::<usize>();
        assert_eq!(count(&sequential), count(&parallel));
        assert_eq!(
            file(find(children(find(&parallel, "src")), "util.js")).hash,
            file(find(children(find(&sequential, "src")), "util.js")).hash
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_counted_and_left_out() {
        let dir = fixture();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        std::os::unix::fs::symlink(root.join("src/util.js"), root.join("util-link.js")).unwrap();
        std::os::unix::fs::symlink(root.join("src/lib"), root.join("lib-link")).unwrap();

        let (tree, stats) = SnapshotBuilder::new(ScanConfig::default())
            .build_with_stats(root)
            .unwrap()
            .unwrap();

        assert!(tree.iter().all(|e| !e.name.contains("-link")));
        assert_eq!(stats.links_skipped, 2);
        assert_eq!(stats.files, 3);
        assert_eq!(stats.directories, 2);
    }

    #[test]
    fn test_relative_uri() {
        assert_eq!(
            relative_uri(Utf8Path::new("/a/b/c.js"), Utf8Path::new("/a")).unwrap(),
            "b/c.js"
        );
        assert!(relative_uri(Utf8Path::new("/x/c.js"), Utf8Path::new("/a")).is_err());
    }
}
