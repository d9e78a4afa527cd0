//! Bounded-context rendering of a full patch.

use crate::model::{Patch, PatchLine};
use std::collections::VecDeque;

/// Context lines kept on each side of a change.
pub const SURROUNDING_CONTEXT: usize = 5;

/// Keep at most `window` context lines before and after every change.
///
/// Long unchanged runs between distant changes are dropped without a
/// marker. Context that is never within `window` lines of a change is
/// dropped too, including leading and trailing runs of the file.
pub fn condense(patch: &Patch, window: usize) -> Patch {
    let mut lines = Vec::new();
    let mut pending: VecDeque<&PatchLine> = VecDeque::with_capacity(window);
    let mut trailing_context = 0;

    for line in &patch.lines {
        if line.is_change() {
            lines.extend(pending.drain(..).cloned());
            lines.push(line.clone());
            trailing_context = window;
        } else if trailing_context > 0 {
            lines.push(line.clone());
            trailing_context -= 1;
        } else if window > 0 {
            // only the last `window` lines can ever be flushed
            if pending.len() == window {
                pending.pop_front();
            }
            pending.push_back(line);
        }
    }

    Patch::with_lines(patch.file_path.clone(), lines)
}
