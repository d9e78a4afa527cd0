//! Reviewer-highlighted regions.

use crate::error::PatchError;
use serde::{Deserialize, Serialize};

/// Which side of the diff a region belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffSide {
    /// The base (before) revision.
    Left,
    /// The target (after) revision.
    Right,
}

/// A 1-indexed, inclusive line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    start_line: usize,
    end_line: usize,
}

impl LineRange {
    /// Create a range, rejecting `start_line == 0` and `start_line > end_line`.
    pub fn new(start_line: usize, end_line: usize) -> Result<Self, PatchError> {
        if start_line == 0 || start_line > end_line {
            return Err(PatchError::Range {
                start: start_line,
                end: end_line,
                len: None,
            });
        }
        Ok(Self {
            start_line,
            end_line,
        })
    }

    /// First line (1-indexed).
    pub fn start_line(&self) -> usize {
        self.start_line
    }

    /// Last line (1-indexed, inclusive).
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    /// `end_line - start_line`.
    pub fn span(&self) -> usize {
        self.end_line - self.start_line
    }
}

/// The regions a reviewer comment is anchored on.
///
/// A comment may highlight lines in the before revision, the after revision,
/// or both. A missing side selects nothing from that revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSelection {
    /// File path relative to repository root.
    pub file_path: String,
    /// Region in the base revision.
    pub left: Option<LineRange>,
    /// Region in the target revision.
    pub right: Option<LineRange>,
}

impl CommentSelection {
    /// Create a selection without any region.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            left: None,
            right: None,
        }
    }

    /// Set the region for one side.
    pub fn with_side(mut self, side: DiffSide, range: LineRange) -> Self {
        match side {
            DiffSide::Left => self.left = Some(range),
            DiffSide::Right => self.right = Some(range),
        }
        self
    }

    /// Whether at least one side carries a region.
    pub fn has_region(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// Region for the given side.
    pub fn side(&self, side: DiffSide) -> Option<LineRange> {
        match side {
            DiffSide::Left => self.left,
            DiffSide::Right => self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_range_validation() {
        assert!(LineRange::new(1, 1).is_ok());
        assert!(matches!(
            LineRange::new(0, 3),
            Err(PatchError::Range { start: 0, .. })
        ));
        assert!(LineRange::new(5, 4).is_err());
    }

    #[test]
    fn test_line_range_span() {
        let range = LineRange::new(2, 4).unwrap();
        assert_eq!(range.span(), 2);
        assert_eq!(range.start_line(), 2);
        assert_eq!(range.end_line(), 4);
    }

    #[test]
    fn test_comment_selection_sides() {
        let range = LineRange::new(3, 12).unwrap();
        let selection = CommentSelection::new("src/main.rs").with_side(DiffSide::Right, range);
        assert_eq!(selection.side(DiffSide::Right), Some(range));
        assert_eq!(selection.side(DiffSide::Left), None);
        assert!(selection.has_region());
        assert!(!CommentSelection::new("src/main.rs").has_region());
    }
}
