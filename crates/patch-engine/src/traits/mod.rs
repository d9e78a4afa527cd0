//! Collaborator traits implemented outside the engine.

mod changed_files;
mod content_provider;

pub use changed_files::ChangedFileProvider;
pub use content_provider::{ContentProvider, ProviderError};
