//! Trait for reading file content at a revision.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by content and changed-file providers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The path does not exist at the requested revision.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A retryable network or API failure.
    #[error("Transient error: {0}")]
    Transient(String),

    /// The path exists but retrying will not make it readable.
    #[error("Unreadable: {0}")]
    Unreadable(String),
}

/// Provides file content for diffing.
///
/// Implementations talk to a forge API, a local checkout, or a test
/// fixture. The engine never holds credentials; it only calls this trait.
///
/// # Example
///
/// ```ignore
/// struct ForgeContentProvider {
///     client: ForgeClient,
///     repository: String,
/// }
///
/// #[async_trait]
/// impl ContentProvider for ForgeContentProvider {
///     async fn read_file(
///         &self,
///         path: &str,
///         revision: Option<&str>,
///     ) -> Result<String, ProviderError> {
///         self.client
///             .item_content(&self.repository, path, revision)
///             .await
///             .map_err(|e| match e.status() {
///                 Some(404) => ProviderError::NotFound(path.to_string()),
///                 _ => ProviderError::Transient(e.to_string()),
///             })
///     }
/// }
/// ```
#[async_trait]
pub trait ContentProvider: Send + Sync {
    /// Read the full text of a file.
    ///
    /// # Arguments
    /// * `path` - File path relative to repository root
    /// * `revision` - Revision to read at; `None` means the provider's default branch
    ///
    /// # Returns
    /// The file content, [`ProviderError::NotFound`] when the path does not
    /// exist at that revision, or [`ProviderError::Transient`] for retryable failures.
    async fn read_file(&self, path: &str, revision: Option<&str>) -> Result<String, ProviderError>;
}
