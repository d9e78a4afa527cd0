//! Line selection for whole files and reviewer-highlighted regions.

use crate::error::PatchError;
use crate::model::{CommentSelection, LineRange};

/// Regions spanning at most this many lines select the whole file instead.
pub const MIN_CONTEXT_LINES: usize = 5;

/// Split file content into lines without line terminators.
pub fn split_lines(content: &str) -> Vec<String> {
    content.lines().map(String::from).collect()
}

/// Select the lines of `content` relevant to `region`.
///
/// See [`select_lines_with`]; uses [`MIN_CONTEXT_LINES`] as threshold.
pub fn select_lines(content: &str, region: Option<LineRange>) -> Result<Vec<String>, PatchError> {
    select_lines_with(content, region, MIN_CONTEXT_LINES)
}

/// Select the lines of `content` relevant to `region`.
///
/// - No region: every line.
/// - A region whose span (`end - start`) exceeds `min_context_lines`: exactly
///   the highlighted lines. Indices outside the file are a [`PatchError::Range`].
/// - A narrower region: every line. A handful of highlighted lines rarely
///   carries enough surrounding code to reason about the change.
pub fn select_lines_with(
    content: &str,
    region: Option<LineRange>,
    min_context_lines: usize,
) -> Result<Vec<String>, PatchError> {
    let lines = split_lines(content);
    let Some(region) = region else {
        return Ok(lines);
    };

    if region.span() <= min_context_lines {
        return Ok(lines);
    }

    if region.end_line() > lines.len() {
        return Err(PatchError::Range {
            start: region.start_line(),
            end: region.end_line(),
            len: Some(lines.len()),
        });
    }

    Ok(lines[region.start_line() - 1..region.end_line()].to_vec())
}

/// Select the left and right line sequences for a reviewer comment.
///
/// A side without a region, or whose content is empty, selects nothing,
/// so the resulting patch is all additions or all removals.
pub fn select_comment_sides(
    original: &str,
    changed: &str,
    selection: &CommentSelection,
    min_context_lines: usize,
) -> Result<(Vec<String>, Vec<String>), PatchError> {
    let left = select_side(original, selection.left, min_context_lines)?;
    let right = select_side(changed, selection.right, min_context_lines)?;
    Ok((left, right))
}

fn select_side(
    content: &str,
    region: Option<LineRange>,
    min_context_lines: usize,
) -> Result<Vec<String>, PatchError> {
    match region {
        Some(region) if !content.is_empty() => {
            select_lines_with(content, Some(region), min_context_lines)
        }
        _ => Ok(Vec::new()),
    }
}
