//! Lexical path arithmetic on catalog uris.
//!
//! Catalog uris are `/`-separated and relative to the snapshot root. Nothing
//! here touches the filesystem: `..` is resolved textually, and a path that
//! climbs above the root keeps its leading `..` components.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Strips one resolvable extension from `path` if it is a true suffix.
///
/// "True suffix" means something other than the extension itself remains and
/// the extension is not a whole path component, so `./.js` stays untouched.
///
/// # Examples
///
/// ```
/// use rl_rewrite::strip_resolvable_extension;
///
/// let exts = [".js".to_owned(), ".ts".to_owned()];
/// assert_eq!(strip_resolvable_extension("./util.js", &exts), "./util");
/// assert_eq!(strip_resolvable_extension("./util", &exts), "./util");
/// assert_eq!(strip_resolvable_extension("./styles.css", &exts), "./styles.css");
/// ```
#[must_use]
pub fn strip_resolvable_extension<'a>(path: &'a str, extensions: &[String]) -> &'a str {
    extensions
        .iter()
        .find_map(|ext| path.strip_suffix(ext.as_str()))
        .filter(|stem| !stem.is_empty() && !stem.ends_with('/'))
        .unwrap_or(path)
}

/// Returns `true` if `path` ends in one of `extensions` as a true suffix.
#[must_use]
pub fn has_resolvable_extension(path: &str, extensions: &[String]) -> bool {
    strip_resolvable_extension(path, extensions).len() != path.len()
}

/// Resolves `.` and `..` components and joins the rest with `/`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use rl_rewrite::normalize;
///
/// assert_eq!(normalize(Utf8Path::new("src/./lib/../util")), "src/util");
/// assert_eq!(normalize(Utf8Path::new("src/../../up")), "../up");
/// ```
#[must_use]
pub fn normalize(path: &Utf8Path) -> Utf8PathBuf {
    let mut parts: Vec<&str> = Vec::new();

    for component in path.components() {
        match component {
            Utf8Component::Normal(part) => parts.push(part),
            Utf8Component::ParentDir => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push(".."),
            },
            Utf8Component::CurDir | Utf8Component::RootDir | Utf8Component::Prefix(_) => {}
        }
    }

    Utf8PathBuf::from(parts.join("/"))
}

/// The directory part of a catalog uri; empty for top-level entries.
#[must_use]
pub fn parent_dir(uri: &Utf8Path) -> &Utf8Path {
    uri.parent().unwrap_or_else(|| Utf8Path::new(""))
}

/// Resolves `literal` against the directory `dir`.
#[must_use]
pub fn join_relative(dir: &Utf8Path, literal: &str) -> Utf8PathBuf {
    normalize(&dir.join(literal))
}

/// Computes the path from directory `from_dir` to `to`, both root-relative.
///
/// The result starts with `./` unless it starts with `..`.
///
/// # Examples
///
/// ```
/// use camino::Utf8Path;
/// use rl_rewrite::relative_path;
///
/// assert_eq!(relative_path(Utf8Path::new("src"), Utf8Path::new("src/lib/util.js")), "./lib/util.js");
/// assert_eq!(relative_path(Utf8Path::new("src/app"), Utf8Path::new("src/lib/util")), "../lib/util");
/// assert_eq!(relative_path(Utf8Path::new(""), Utf8Path::new("util")), "./util");
/// ```
#[must_use]
pub fn relative_path(from_dir: &Utf8Path, to: &Utf8Path) -> String {
    let from_dir = normalize(from_dir);
    let to = normalize(to);

    let from_parts: Vec<&str> = from_dir.iter().collect();
    let to_parts: Vec<&str> = to.iter().collect();

    let common = from_parts
        .iter()
        .zip(&to_parts)
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = vec![".."; from_parts.len() - common];
    parts.extend_from_slice(&to_parts[common..]);

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{joined}")
    }
}
