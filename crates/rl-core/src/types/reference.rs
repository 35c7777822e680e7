//! Located import literals.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// An import-path literal found inside one text blob.
///
/// Offsets are UTF-8 byte offsets into the text the reference was extracted
/// from, and cover the literal only (not its quotes).
///
/// # Examples
///
/// ```
/// use rl_core::Reference;
///
/// let text = r#"import { x } from "./util";"#;
/// let reference = Reference::new("./util", 19);
///
/// assert_eq!(reference.end, 25);
/// assert_eq!(&text[reference.span()], "./util");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// The unquoted literal.
    pub literal: String,

    /// Offset of the literal's first byte.
    pub start: usize,

    /// Offset one past the literal's last byte.
    pub end: usize,
}

impl Reference {
    /// Creates a reference whose span is `start..start + literal.len()`.
    #[must_use]
    pub fn new(literal: impl Into<String>, start: usize) -> Self {
        let literal = literal.into();
        let end = start + literal.len();
        Self {
            literal,
            start,
            end,
        }
    }

    /// The byte range covered by the literal.
    #[inline]
    #[must_use]
    pub const fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// References partitioned by how their literal resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceGroup {
    /// Literals starting with `.`, resolved against the importing file.
    pub relative: Vec<Reference>,

    /// Path-like literals resolved against the snapshot root.
    pub absolute: Vec<Reference>,

    /// Bare package names.
    pub library: Vec<Reference>,
}

impl ReferenceGroup {
    /// Total number of references across all groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.relative.len() + self.absolute.len() + self.library.len()
    }

    /// Returns `true` if no group holds a reference.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_span() {
        let reference = Reference::new("./a", 5);
        assert_eq!(reference.span(), 5..8);
        assert_eq!(reference.end - reference.start, reference.literal.len());
    }

    #[test]
    fn test_reference_group_len() {
        let mut group = ReferenceGroup::default();
        assert!(group.is_empty());
        group.library.push(Reference::new("react", 0));
        group.relative.push(Reference::new("./a", 20));
        assert_eq!(group.len(), 2);
    }
}
