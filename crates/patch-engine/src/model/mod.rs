//! Data models for patch representation.

mod change_set;
mod patch;
mod selection;

pub use change_set::{ChangeSetReport, ChangedFile, ChangedFilesPage, FileFailure, FilePatch};
pub use patch::{LineKind, Patch, PatchLine};
pub use selection::{CommentSelection, DiffSide, LineRange};
