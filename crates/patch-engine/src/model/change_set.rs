//! Changed-file listings and the aggregated result for a revision pair.

use super::Patch;
use crate::error::PatchError;
use serde::{Deserialize, Serialize};

/// A file reported as changed between two revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    /// File path relative to repository root.
    pub path: String,
    /// False for files added in the target revision; their original content is empty.
    pub exists_at_base: bool,
    /// Folder entries are listed by some providers and are never diffed.
    #[serde(default)]
    pub is_folder: bool,
}

impl ChangedFile {
    /// A file present in both revisions.
    pub fn modified(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            exists_at_base: true,
            is_folder: false,
        }
    }

    /// A file added in the target revision.
    pub fn added(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            exists_at_base: false,
            is_folder: false,
        }
    }

    /// A folder entry.
    pub fn folder(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            exists_at_base: true,
            is_folder: true,
        }
    }
}

/// One page of a changed-file listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFilesPage {
    /// Files on this page (may be empty even when more pages follow).
    pub files: Vec<ChangedFile>,
    /// Token for the next page.
    pub next_page_token: Option<String>,
    /// True once the provider has returned every result.
    pub done: bool,
}

/// A successfully produced patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePatch {
    /// Position of the file in the provider's listing.
    pub index: usize,
    /// The patch.
    pub patch: Patch,
}

/// A file whose patch could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFailure {
    /// Position of the file in the provider's listing.
    pub index: usize,
    /// File path.
    pub path: String,
    /// Rendered error.
    pub message: String,
    /// Whether retrying later may succeed.
    pub retryable: bool,
}

impl FileFailure {
    pub(crate) fn new(index: usize, path: impl Into<String>, error: &PatchError) -> Self {
        Self {
            index,
            path: path.into(),
            message: error.to_string(),
            retryable: error.is_retryable(),
        }
    }
}

/// Patches for every file changed between two revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSetReport {
    /// Base revision (before).
    pub base_revision: String,
    /// Target revision (after).
    pub target_revision: String,
    /// Produced patches, in listing order.
    pub patches: Vec<FilePatch>,
    /// Per-file failures, in listing order.
    pub failures: Vec<FileFailure>,
    /// Total added lines across all patches.
    pub total_additions: usize,
    /// Total removed lines across all patches.
    pub total_removals: usize,
}

impl ChangeSetReport {
    /// Create an empty report.
    pub fn new(base_revision: impl Into<String>, target_revision: impl Into<String>) -> Self {
        Self {
            base_revision: base_revision.into(),
            target_revision: target_revision.into(),
            patches: Vec::new(),
            failures: Vec::new(),
            total_additions: 0,
            total_removals: 0,
        }
    }

    /// Recalculate totals from patches.
    pub fn recalculate_totals(&mut self) {
        self.total_additions = self.patches.iter().map(|p| p.patch.additions()).sum();
        self.total_removals = self.patches.iter().map(|p| p.patch.removals()).sum();
    }

    /// True when every listed file produced a patch.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Patches without their listing positions.
    pub fn into_patches(self) -> Vec<Patch> {
        self.patches.into_iter().map(|p| p.patch).collect()
    }
}
