//! Trait for listing files changed between two revisions.

use super::ProviderError;
use crate::model::ChangedFilesPage;
use async_trait::async_trait;

/// Lists the files changed between a base and a target revision.
///
/// Results are paginated. A page may be empty without being the last one;
/// only [`ChangedFilesPage::done`] ends the listing.
#[async_trait]
pub trait ChangedFileProvider: Send + Sync {
    /// Fetch one page of changed files.
    ///
    /// # Arguments
    /// * `base_revision` - The revision changes are measured from
    /// * `target_revision` - The revision containing the changes
    /// * `page_token` - `None` for the first page, then the previous page's `next_page_token`
    async fn list_changed_files(
        &self,
        base_revision: &str,
        target_revision: &str,
        page_token: Option<&str>,
    ) -> Result<ChangedFilesPage, ProviderError>;
}
