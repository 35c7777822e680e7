//! Tree to catalog flattening.
//!
//! [`flatten`] performs one explicit-stack depth-first traversal. Children are
//! pushed in reverse so they pop in listing order, which makes the output
//! pre-order: every directory is immediately followed by its whole subtree.

use rl_core::{Catalog, CatalogEntry, CatalogKind, CoreError, Tree, TreeEntry, TreeKind};

/// Flattens a snapshot tree into a [`Catalog`].
///
/// Each directory's content collapses to the digests of its immediate file
/// children, in child order; nested directories contribute nothing to that
/// list but follow the directory as entries of their own.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if two nodes share a uri.
///
/// # Examples
///
/// ```
/// use rl_core::{ContentHash, FileEntry, TreeEntry};
/// use rl_scanner::flatten;
///
/// let util = TreeEntry::file("src/util.js", FileEntry::from_name("util.js", ContentHash::from("h1"), None));
/// let tree = vec![TreeEntry::directory("src", vec![util])];
///
/// let catalog = flatten(tree)?;
/// let uris: Vec<_> = catalog.entries().iter().map(|e| e.uri.as_str()).collect();
/// assert_eq!(uris, ["src", "src/util.js"]);
/// # Ok::<(), rl_core::CoreError>(())
/// ```
pub fn flatten(tree: Tree) -> Result<Catalog, CoreError> {
    let total = tree.iter().map(TreeEntry::count).sum();
    let mut entries = Vec::with_capacity(total);

    let mut stack: Vec<TreeEntry> = tree;
    stack.reverse();

    while let Some(TreeEntry { name, uri, kind }) = stack.pop() {
        match kind {
            TreeKind::File(file) => entries.push(CatalogEntry {
                name,
                uri,
                kind: CatalogKind::File(file),
            }),
            TreeKind::Directory { children } => {
                let file_hashes = children
                    .iter()
                    .filter_map(|child| match &child.kind {
                        TreeKind::File(file) => Some(file.hash.clone()),
                        TreeKind::Directory { .. } => None,
                    })
                    .collect();

                entries.push(CatalogEntry {
                    name,
                    uri,
                    kind: CatalogKind::Directory { file_hashes },
                });
                stack.extend(children.into_iter().rev());
            }
        }
    }

    Catalog::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rl_core::{ContentHash, FileEntry};

    fn file(uri: &str, hash: &str) -> TreeEntry {
        let name = uri.rsplit('/').next().unwrap();
        TreeEntry::file(uri, FileEntry::from_name(name, ContentHash::from(hash), None))
    }

    fn sample() -> Tree {
        vec![
            TreeEntry::directory(
                "src",
                vec![
                    file("src/a.js", "h1"),
                    TreeEntry::directory(
                        "src/lib",
                        vec![file("src/lib/b.js", "h2"), TreeEntry::directory("src/lib/empty", vec![])],
                    ),
                    file("src/c.js", "h3"),
                ],
            ),
            file("README.md", "h4"),
        ]
    }

    fn uris(catalog: &Catalog) -> Vec<&str> {
        catalog.entries().iter().map(|e| e.uri.as_str()).collect()
    }

    #[test]
    fn test_pre_order() {
        let catalog = flatten(sample()).unwrap();
        assert_eq!(
            uris(&catalog),
            vec![
                "src",
                "src/a.js",
                "src/lib",
                "src/lib/b.js",
                "src/lib/empty",
                "src/c.js",
                "README.md",
            ]
        );
    }

    #[test]
    fn test_every_node_exactly_once() {
        let tree = sample();
        let expected: usize = tree.iter().map(TreeEntry::count).sum();

        let catalog = flatten(tree).unwrap();
        assert_eq!(catalog.len(), expected);
        assert_eq!(catalog.files().count(), 4);
        assert_eq!(catalog.directories().count(), 3);
    }

    #[test]
    fn test_directory_keeps_immediate_file_hashes() {
        let catalog = flatten(sample()).unwrap();

        let hashes = |uri: &str| match &catalog.get(camino::Utf8Path::new(uri)).unwrap().kind {
            CatalogKind::Directory { file_hashes } => {
                file_hashes.iter().map(ContentHash::as_str).collect::<Vec<_>>()
            }
            CatalogKind::File(_) => vec![],
        };

        // Nested directory children contribute nothing
        assert_eq!(hashes("src"), vec!["h1", "h3"]);
        assert_eq!(hashes("src/lib"), vec!["h2"]);
        assert!(hashes("src/lib/empty").is_empty());
    }

    #[test]
    fn test_subtree_is_contiguous() {
        let catalog = flatten(sample()).unwrap();
        let entries = catalog.entries();
        let lib = entries.iter().position(|e| e.uri == "src/lib").unwrap();

        // src/lib is followed by exactly its two descendants
        assert!(entries[lib + 1].uri.starts_with("src/lib"));
        assert!(entries[lib + 2].uri.starts_with("src/lib"));
        assert!(!entries[lib + 3].uri.starts_with("src/lib"));
    }

    #[test]
    fn test_empty_tree() {
        assert!(flatten(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_uris_rejected() {
        let tree = vec![file("a.js", "h1"), file("a.js", "h2")];
        assert!(flatten(tree).is_err());
    }
}
