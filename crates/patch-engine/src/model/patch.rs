//! Patch data structures produced by the formatter.

use serde::{Deserialize, Serialize};

/// A single file's patch.
///
/// The header (the file path) is kept apart from `lines`, so condensing
/// never touches it. Rendering prints it first as a bare path line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patch {
    /// File path shown as the patch header.
    pub file_path: String,
    /// Tagged lines in alignment order.
    pub lines: Vec<PatchLine>,
}

impl Patch {
    /// Create an empty patch for the given file.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            lines: Vec::new(),
        }
    }

    /// Create a patch from already tagged lines.
    pub fn with_lines(file_path: impl Into<String>, lines: Vec<PatchLine>) -> Self {
        Self {
            file_path: file_path.into(),
            lines,
        }
    }

    /// Number of added lines.
    pub fn additions(&self) -> usize {
        self.count(LineKind::Added)
    }

    /// Number of removed lines.
    pub fn removals(&self) -> usize {
        self.count(LineKind::Removed)
    }

    /// Whether the patch contains any added or removed line.
    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(PatchLine::is_change)
    }

    /// Lines of the left (before) side: context plus removals, in order.
    pub fn left_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            PatchLine::Context(text) | PatchLine::Removed(text) => Some(text.as_str()),
            PatchLine::Added(_) => None,
        })
    }

    /// Lines of the right (after) side: context plus additions, in order.
    pub fn right_lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            PatchLine::Context(text) | PatchLine::Added(text) => Some(text.as_str()),
            PatchLine::Removed(_) => None,
        })
    }

    fn count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind() == kind).count()
    }
}

/// A single tagged line in a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum PatchLine {
    /// Line present in both revisions.
    Context(String),
    /// Line only present in the left (before) revision.
    Removed(String),
    /// Line only present in the right (after) revision.
    Added(String),
}

impl PatchLine {
    /// Get the line kind.
    pub fn kind(&self) -> LineKind {
        match self {
            PatchLine::Context(_) => LineKind::Context,
            PatchLine::Removed(_) => LineKind::Removed,
            PatchLine::Added(_) => LineKind::Added,
        }
    }

    /// Line content without prefix.
    pub fn text(&self) -> &str {
        match self {
            PatchLine::Context(text) | PatchLine::Removed(text) | PatchLine::Added(text) => text,
        }
    }

    /// Whether this line is an addition or a removal.
    pub fn is_change(&self) -> bool {
        !matches!(self, PatchLine::Context(_))
    }
}

/// Line type in the patch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Unchanged line.
    Context,
    /// Removed line (-).
    Removed,
    /// Added line (+).
    Added,
}

impl LineKind {
    /// Get the textual prefix for this line type.
    pub fn prefix(&self) -> &'static str {
        match self {
            LineKind::Context => " ",
            LineKind::Removed => "- ",
            LineKind::Added => "+ ",
        }
    }
}
