//! Single-level directory listing.
//!
//! [`DirLister`] wraps the `ignore` crate's walker, capped at depth one, to
//! list the immediate children of a directory. The snapshot builder drives the
//! recursion itself so that it can build the nested tree as it goes.
//!
//! Unlike a source scanner, a snapshot must see every node, so gitignore and
//! hidden-file filtering are disabled; only the configured ignore names apply.

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::ScanError;

/// One child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listed {
    /// Absolute (or root-relative, matching the input) path of the child.
    pub path: Utf8PathBuf,
    /// Final path component.
    pub name: String,
    /// Whether the child is a directory.
    pub is_dir: bool,
    /// Whether the child is a symbolic link (never followed).
    pub is_symlink: bool,
}

/// Lists immediate directory children, skipping ignored names.
///
/// # Examples
///
/// ```no_run
/// use rl_scanner::DirLister;
/// use camino::Utf8Path;
///
/// let lister = DirLister::new(&["node_modules".to_owned()]);
/// for child in lister.list(Utf8Path::new("./src"))? {
///     println!("{} (dir: {})", child.name, child.is_dir);
/// }
/// # Ok::<(), rl_scanner::ScanError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct DirLister {
    /// Names to skip (exact match on the final component).
    skip_names: Vec<String>,
}

impl DirLister {
    /// Creates a lister that skips the given names.
    #[must_use]
    pub fn new(skip_names: &[String]) -> Self {
        Self {
            skip_names: skip_names.to_vec(),
        }
    }

    /// Lists the children of `dir` in directory-listing order.
    ///
    /// Symbolic links are not followed. They are listed with
    /// [`Listed::is_symlink`] set and `is_dir` false, so the caller decides
    /// what to do with them.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::InvalidPath`] if `dir` is not a directory,
    /// [`ScanError::Walk`] if listing fails, and [`ScanError::NonUtf8Path`]
    /// for children whose path is not UTF-8.
    pub fn list(&self, dir: &Utf8Path) -> Result<Vec<Listed>, ScanError> {
        if !dir.is_dir() {
            return Err(ScanError::invalid_path(dir, "is not a directory"));
        }

        let mut children = Vec::new();

        for result in self.build_walker(dir) {
            let entry = result?;

            // The walker yields the directory itself at depth 0
            if entry.depth() == 0 {
                continue;
            }

            let path = entry.path();
            let utf8_path =
                Utf8Path::from_path(path).ok_or_else(|| ScanError::NonUtf8Path(path.to_owned()))?;

            let Some(name) = utf8_path.file_name() else {
                continue;
            };

            if self.should_skip(name) {
                debug!(path = %utf8_path, "Skipping ignored entry");
                continue;
            }

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            children.push(Listed {
                path: utf8_path.to_owned(),
                name: name.to_owned(),
                is_dir: file_type.is_dir(),
                is_symlink: file_type.is_symlink(),
            });
        }

        Ok(children)
    }

    /// Builds a depth-one walker with every implicit filter disabled.
    #[allow(clippy::unused_self)] // Method signature kept for consistency
    fn build_walker(&self, dir: &Utf8Path) -> ignore::Walk {
        WalkBuilder::new(dir)
            .standard_filters(false)
            .follow_links(false)
            .max_depth(Some(1))
            .threads(1)
            .build()
    }

    /// Checks if an entry name is on the skip list.
    fn should_skip(&self, name: &str) -> bool {
        self.skip_names.iter().any(|s| s == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(children: &[Listed]) -> Vec<&str> {
        let mut names: Vec<_> = children.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn test_lists_immediate_children_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src/lib")).unwrap();
        fs::write(dir.path().join("src/lib/deep.js"), "").unwrap();
        fs::write(dir.path().join("index.js"), "").unwrap();
        fs::write(dir.path().join(".hidden"), "").unwrap();

        let root = Utf8Path::from_path(dir.path()).unwrap();
        let children = DirLister::default().list(root).unwrap();

        assert_eq!(names(&children), vec![".hidden", "index.js", "src"]);
        let src = children.iter().find(|c| c.name == "src").unwrap();
        assert!(src.is_dir);
        assert_eq!(src.path, root.join("src"));
    }

    #[test]
    fn test_skips_ignored_names() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();

        let root = Utf8Path::from_path(dir.path()).unwrap();
        let children = DirLister::new(&["node_modules".to_owned()]).list(root).unwrap();
        assert_eq!(names(&children), vec!["a.js"]);
    }

    #[test]
    fn test_list_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.js");
        fs::write(&file, "").unwrap();

        let err = DirLister::default()
            .list(Utf8Path::from_path(&file).unwrap())
            .unwrap_err();
        assert!(matches!(err, ScanError::InvalidPath { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_flagged_not_followed() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let root = Utf8Path::from_path(dir.path()).unwrap();
        let children = DirLister::default().list(root).unwrap();
        assert_eq!(names(&children), vec!["link", "real"]);

        let link = children.iter().find(|c| c.name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(!link.is_dir);
        let real = children.iter().find(|c| c.name == "real").unwrap();
        assert!(!real.is_symlink);
        assert!(real.is_dir);
    }

    #[test]
    fn test_should_skip() {
        let lister = DirLister::new(&["dist".to_owned()]);
        assert!(lister.should_skip("dist"));
        assert!(!lister.should_skip("distribution"));
    }
}
