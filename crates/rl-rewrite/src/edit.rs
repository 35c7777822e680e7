//! Offset-tracked edit application.

use rl_core::Edit;

use crate::error::RewriteError;

/// Applies `edits` to `content` and returns the patched text.
///
/// Edit offsets refer to the unmodified text. A running delta, starting at
/// zero, shifts each edit by the net length change of the edits before it,
/// so `edits` must be in ascending `start` order and must not overlap. That
/// order is not checked.
///
/// # Errors
///
/// Returns [`RewriteError::InvalidInput`] if a shifted span is reversed, runs
/// past the end of the text, or does not fall on character boundaries.
///
/// # Examples
///
/// ```
/// use rl_core::Edit;
/// use rl_rewrite::apply_edits;
///
/// let edit = Edit {
///     original: "./util".to_owned(),
///     replacement: "./lib/util".to_owned(),
///     start: 19,
///     end: 25,
/// };
/// let patched = apply_edits(r#"import { x } from "./util";"#, &[edit])?;
/// assert_eq!(patched, r#"import { x } from "./lib/util";"#);
/// # Ok::<(), rl_rewrite::RewriteError>(())
/// ```
pub fn apply_edits(content: &str, edits: &[Edit]) -> Result<String, RewriteError> {
    let mut patched = content.to_owned();
    let mut delta: isize = 0;

    for edit in edits {
        let (Some(start), Some(end)) = (
            edit.start.checked_add_signed(delta),
            edit.end.checked_add_signed(delta),
        ) else {
            return Err(out_of_range(edit, patched.len()));
        };

        if start > end
            || end > patched.len()
            || !patched.is_char_boundary(start)
            || !patched.is_char_boundary(end)
        {
            return Err(out_of_range(edit, patched.len()));
        }

        patched.replace_range(start..end, &edit.replacement);
        delta += edit.delta();
    }

    Ok(patched)
}

fn out_of_range(edit: &Edit, len: usize) -> RewriteError {
    RewriteError::invalid_input(format!(
        "edit {}..{} ('{}') does not fit text of length {len}",
        edit.start, edit.end, edit.original
    ))
}
