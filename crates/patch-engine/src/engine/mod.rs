//! Alignment, formatting and condensing of line sequences.

mod align;
mod condense;
mod format;

pub use align::{align, CostMatrix};
pub use condense::{condense, SURROUNDING_CONTEXT};
pub use format::{format_patch, format_patch_with, BacktraceMode};

use crate::model::Patch;

/// How a single patch is produced from two line sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchOptions {
    /// Matrix walk used by the formatter.
    pub backtrace: BacktraceMode,
    /// Condense to this many context lines around each change.
    pub condense_window: Option<usize>,
}

impl PatchOptions {
    /// Full patches condensed to [`SURROUNDING_CONTEXT`] lines.
    pub fn condensed() -> Self {
        Self {
            condense_window: Some(SURROUNDING_CONTEXT),
            ..Self::default()
        }
    }
}

/// Align, format and optionally condense `left` against `right`.
///
/// The cost matrix is dropped before returning.
pub fn build_patch<L, R>(left: &[L], right: &[R], file_path: &str, options: &PatchOptions) -> Patch
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    let patch = {
        let cost = align(left, right);
        format_patch_with(left, right, &cost, file_path, options.backtrace)
    };

    match options.condense_window {
        Some(window) => condense(&patch, window),
        None => patch,
    }
}
