//! Offset-based text substitutions.

use serde::{Deserialize, Serialize};

use super::reference::Reference;

/// A planned substitution, expressed against the unmodified text.
///
/// When several edits are applied to one string they must be processed in
/// ascending `start` order while carrying the accumulated [`Edit::delta`]
/// forward; see `rl_rewrite::apply_edits`.
///
/// # Examples
///
/// ```
/// use rl_core::{Edit, Reference};
///
/// let edit = Edit::replace(&Reference::new("./util", 19), "./lib/util");
/// assert_eq!(edit.end, 25);
/// assert_eq!(edit.delta(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edit {
    /// The text being replaced.
    pub original: String,

    /// The text to splice in.
    pub replacement: String,

    /// Start offset in the unmodified text.
    pub start: usize,

    /// End offset (exclusive) in the unmodified text.
    pub end: usize,
}

impl Edit {
    /// Plans the replacement of a located reference.
    #[must_use]
    pub fn replace(reference: &Reference, replacement: impl Into<String>) -> Self {
        Self {
            original: reference.literal.clone(),
            replacement: replacement.into(),
            start: reference.start,
            end: reference.end,
        }
    }

    /// Length change this edit causes (`replacement − original`).
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // text lengths never approach isize::MAX
    pub fn delta(&self) -> isize {
        self.replacement.len() as isize - self.original.len() as isize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shrinking_delta() {
        let edit = Edit {
            original: "../../deep/util".to_owned(),
            replacement: "./util".to_owned(),
            start: 0,
            end: 15,
        };
        assert_eq!(edit.delta(), -9);
    }
}
