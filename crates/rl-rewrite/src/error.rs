//! Error types for the rl-rewrite crate.

use thiserror::Error;

/// Errors that can occur while extracting references or applying edits.
///
/// # Examples
///
/// ```
/// use rl_rewrite::RewriteError;
///
/// let err = RewriteError::invalid_input("edit 3..9 is out of range");
/// assert!(err.is_invalid_input());
/// assert_eq!(err.to_string(), "invalid input: edit 3..9 is out of range");
/// ```
#[derive(Debug, Error)]
pub enum RewriteError {
    /// Content, edits or the pattern shape were rejected.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong.
        reason: String,
    },

    /// The import pattern does not compile.
    #[error("invalid import pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl RewriteError {
    /// Creates a new [`RewriteError::InvalidInput`].
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns `true` for every variant: a bad pattern is bad input too.
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::Pattern(_))
    }
}
