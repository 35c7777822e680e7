//! Reference classification.

use rl_core::{Reference, ReferenceGroup};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// How an import literal resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Starts with `.`: resolved against the importing file's directory.
    Relative,
    /// Any other path-like literal: resolved against the snapshot root.
    Absolute,
    /// No `.` and no `/`: a package name, never rewritten.
    Library,
}

impl ReferenceKind {
    /// Classifies a literal. The first matching rule wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use rl_rewrite::ReferenceKind;
    ///
    /// assert_eq!(ReferenceKind::of("react"), ReferenceKind::Library);
    /// assert_eq!(ReferenceKind::of("./util"), ReferenceKind::Relative);
    /// assert_eq!(ReferenceKind::of("src/util"), ReferenceKind::Absolute);
    /// assert_eq!(ReferenceKind::of("/src/util"), ReferenceKind::Absolute);
    /// ```
    #[must_use]
    pub fn of(literal: &str) -> Self {
        if !literal.contains(['.', '/']) {
            Self::Library
        } else if literal.starts_with('.') {
            Self::Relative
        } else {
            Self::Absolute
        }
    }
}

/// Partitions references by [`ReferenceKind`].
///
/// Literals containing `excluded_marker` are dropped first; an empty marker
/// excludes nothing. Each group keeps input order.
#[must_use]
pub fn classify(references: Vec<Reference>, excluded_marker: &str) -> ReferenceGroup {
    let mut group = ReferenceGroup::default();

    for reference in references {
        if !excluded_marker.is_empty() && reference.literal.contains(excluded_marker) {
            trace!(literal = %reference.literal, "Excluded reference");
            continue;
        }
        match ReferenceKind::of(&reference.literal) {
            ReferenceKind::Relative => group.relative.push(reference),
            ReferenceKind::Absolute => group.absolute.push(reference),
            ReferenceKind::Library => group.library.push(reference),
        }
    }

    group
}
