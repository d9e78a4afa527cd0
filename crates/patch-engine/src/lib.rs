//! # patch-engine
//!
//! Contextual line-diff and patch generation for pull request reviews.
//! Given two revisions of a file, or the lines a reviewer highlighted in a
//! comment, it produces a compact patch suited for people and language
//! models alike.
//!
//! ## Design Principles
//!
//! The engine is **instrumented**: file content and changed-file listings
//! come in through the [`ContentProvider`] and [`ChangedFileProvider`]
//! traits, and patches go out as values. It holds no credentials and no
//! process-wide state, which keeps it testable without network mocks.
//!
//! ## Pipeline
//!
//! ```text
//! ChangeSetAggregator ──► select_lines ──► align ──► format_patch ──► condense
//!   (per changed file)    (LineSelector)   (cost     (tagged lines)   (bounded
//!                                           matrix)                    context)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use patch_engine::{build_patch, PatchOptions, select_lines};
//!
//! let left = select_lines("a\nb\nc\n", None).unwrap();
//! let right = select_lines("a\nx\nc\n", None).unwrap();
//! let patch = build_patch(&left, &right, "notes.txt", &PatchOptions::default());
//! assert!(patch.to_string().starts_with("notes.txt\n a"));
//! ```

pub mod aggregate;
pub mod cancel;
pub mod comment;
pub mod engine;
pub mod error;
pub mod model;
pub mod render;
pub mod selection;
pub mod traits;

// Re-export commonly used types
pub use aggregate::{available_workers, AggregatorOptions, ChangeSetAggregator};
pub use cancel::{CancelHandle, CancelSignal};
pub use comment::comment_patch;
pub use engine::{
    align, build_patch, condense, format_patch, format_patch_with, BacktraceMode, CostMatrix,
    PatchOptions, SURROUNDING_CONTEXT,
};
pub use error::PatchError;
pub use model::{
    ChangeSetReport, ChangedFile, ChangedFilesPage, CommentSelection, DiffSide, FileFailure,
    FilePatch, LineKind, LineRange, Patch, PatchLine,
};
pub use render::render_patches;
pub use selection::{
    select_comment_sides, select_lines, select_lines_with, split_lines, MIN_CONTEXT_LINES,
};
pub use traits::{ChangedFileProvider, ContentProvider, ProviderError};
