//! Patches scoped to a reviewer comment.

use crate::engine::{build_patch, PatchOptions};
use crate::error::PatchError;
use crate::model::{CommentSelection, Patch};
use crate::selection::select_comment_sides;

/// Build the patch a reviewer comment refers to.
///
/// `original` and `changed` are the full file contents at the base and target
/// revisions. Each side is narrowed by its region (see
/// [`select_lines_with`](crate::selection::select_lines_with)); a side without
/// a region contributes no lines. A selection that ends up with no lines on
/// either side is a [`PatchError::EmptySelection`].
pub fn comment_patch(
    original: &str,
    changed: &str,
    selection: &CommentSelection,
    min_context_lines: usize,
    options: &PatchOptions,
) -> Result<Patch, PatchError> {
    let empty_selection = || PatchError::EmptySelection {
        path: selection.file_path.clone(),
    };
    if !selection.has_region() {
        return Err(empty_selection());
    }

    let (left, right) = select_comment_sides(original, changed, selection, min_context_lines)?;
    if left.is_empty() && right.is_empty() {
        return Err(empty_selection());
    }
    Ok(build_patch(&left, &right, &selection.file_path, options))
}
