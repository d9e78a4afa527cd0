//! Two directory trees as a pair of revisions.
//!
//! A revision is the path of a directory. The changed-file listing walks the
//! target tree and reports every file that is new or whose bytes differ from
//! the base tree. Files that only exist in the base tree are not listed.
//!
//! The walk happens once per listing: the first page computes it, later
//! pages are served from memory, and the final page releases it.

use async_trait::async_trait;
use patch_engine::{ChangedFile, ChangedFileProvider, ChangedFilesPage, ContentProvider, ProviderError};
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use walkdir::WalkDir;

type ListingKey = (String, String);

/// Serves file content and changed-file listings from local directories.
#[derive(Debug, Clone)]
pub struct LocalTreeProvider {
    page_size: usize,
    listings: Arc<Mutex<HashMap<ListingKey, Arc<Vec<ChangedFile>>>>>,
}

impl LocalTreeProvider {
    /// Create a provider returning at most `page_size` entries per page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            listings: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The listing for a revision pair, walking the trees on the first page
    /// or when no walk is cached.
    async fn listing(&self, key: &ListingKey, first_page: bool) -> Result<Arc<Vec<ChangedFile>>, ProviderError> {
        if !first_page {
            let listings = self.listings.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(files) = listings.get(key) {
                return Ok(Arc::clone(files));
            }
        }

        let base = PathBuf::from(&key.0);
        let target = PathBuf::from(&key.1);
        let files = tokio::task::spawn_blocking(move || changed_files(&base, &target))
            .await
            .map_err(|e| ProviderError::Transient(e.to_string()))?
            .map_err(|e| ProviderError::Transient(e.to_string()))?;
        log::debug!("Walked {} against {}: {} changed files", key.1, key.0, files.len());

        let files = Arc::new(files);
        let mut listings = self.listings.lock().unwrap_or_else(PoisonError::into_inner);
        listings.insert(key.clone(), Arc::clone(&files));
        Ok(files)
    }

    fn release(&self, key: &ListingKey) {
        let mut listings = self.listings.lock().unwrap_or_else(PoisonError::into_inner);
        listings.remove(key);
    }
}

#[async_trait]
impl ContentProvider for LocalTreeProvider {
    async fn read_file(&self, path: &str, revision: Option<&str>) -> Result<String, ProviderError> {
        let full_path = Path::new(revision.unwrap_or(".")).join(path);
        tokio::fs::read_to_string(&full_path)
            .await
            .map_err(|e| {
                let message = format!("{}: {}", full_path.display(), e);
                match e.kind() {
                    io::ErrorKind::NotFound => ProviderError::NotFound(path.to_string()),
                    io::ErrorKind::InvalidData | io::ErrorKind::PermissionDenied => {
                        ProviderError::Unreadable(message)
                    }
                    _ => ProviderError::Transient(message),
                }
            })
    }
}

#[async_trait]
impl ChangedFileProvider for LocalTreeProvider {
    async fn list_changed_files(
        &self,
        base_revision: &str,
        target_revision: &str,
        page_token: Option<&str>,
    ) -> Result<ChangedFilesPage, ProviderError> {
        let offset = match page_token {
            Some(token) => token
                .parse::<usize>()
                .map_err(|_| ProviderError::Transient(format!("invalid page token {:?}", token)))?,
            None => 0,
        };

        let key = (base_revision.to_string(), target_revision.to_string());
        let files = self.listing(&key, page_token.is_none()).await?;

        let end = offset.saturating_add(self.page_size).min(files.len());
        let done = end >= files.len();
        let page = files.get(offset..end).map(<[_]>::to_vec).unwrap_or_default();
        log::debug!(
            "Listed {} of {} changed files from offset {}",
            page.len(),
            files.len(),
            offset
        );

        if done {
            self.release(&key);
        }
        Ok(ChangedFilesPage {
            files: page,
            next_page_token: (!done).then(|| end.to_string()),
            done,
        })
    }
}

/// Files in `target` that are new or differ from `base`, sorted by path.
fn changed_files(base: &Path, target: &Path) -> io::Result<Vec<ChangedFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(target)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(target) else {
            continue;
        };
        let path = relative_path(relative);

        let base_path = base.join(relative);
        if base_path.is_file() {
            if std::fs::read(entry.path())? != std::fs::read(&base_path)? {
                files.push(ChangedFile::modified(path));
            }
        } else {
            files.push(ChangedFile::added(path));
        }
    }

    Ok(files)
}

/// `/`-separated form of a relative path.
fn relative_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
