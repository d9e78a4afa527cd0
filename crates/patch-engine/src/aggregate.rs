//! Patches for every file changed between two revisions.
//!
//! Content fetches are I/O bound and fan out across a [`JoinSet`], limited by
//! a semaphore so the remote API is never hit by more than
//! `max_in_flight_fetches` requests at once. Diffs are CPU bound and run on
//! the blocking pool, limited to `diff_workers` at a time.
//!
//! Cancellation aborts every in-flight task and discards patches of files
//! that had already finished; the call returns [`PatchError::Cancelled`].

use crate::cancel::CancelSignal;
use crate::comment::comment_patch;
use crate::engine::{build_patch, PatchOptions};
use crate::error::PatchError;
use crate::model::{ChangeSetReport, ChangedFile, CommentSelection, FileFailure, FilePatch, Patch};
use crate::selection::{split_lines, MIN_CONTEXT_LINES};
use crate::traits::{ChangedFileProvider, ContentProvider, ProviderError};
use log::{debug, error, info, warn};
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Default bound on simultaneous content fetches.
pub const DEFAULT_MAX_IN_FLIGHT_FETCHES: usize = 8;

/// Default bound on pages read from a changed-file listing.
pub const DEFAULT_MAX_PAGES: usize = 1000;

/// Tuning for [`ChangeSetAggregator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorOptions {
    /// How each patch is produced.
    pub patch: PatchOptions,
    /// Threshold used for comment regions.
    pub min_context_lines: usize,
    /// Simultaneous content fetches.
    pub max_in_flight_fetches: usize,
    /// Simultaneous diff computations.
    pub diff_workers: usize,
    /// Pages read before a listing is declared inconsistent.
    pub max_pages: usize,
}

impl Default for AggregatorOptions {
    fn default() -> Self {
        Self {
            patch: PatchOptions::default(),
            min_context_lines: MIN_CONTEXT_LINES,
            max_in_flight_fetches: DEFAULT_MAX_IN_FLIGHT_FETCHES,
            diff_workers: available_workers(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

/// Number of CPU workers available to diffing.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Builds patches for a revision pair from a [`ContentProvider`].
///
/// # Example
///
/// ```rust,ignore
/// let aggregator = ChangeSetAggregator::new(Arc::new(provider));
/// let report = aggregator.diff_change_set(&lister, "base", "head").await?;
/// for failure in &report.failures {
///     eprintln!("{}: {}", failure.path, failure.message);
/// }
/// println!("{}", render_patches(report.patches.iter().map(|p| &p.patch)));
/// ```
pub struct ChangeSetAggregator<P: ?Sized> {
    provider: Arc<P>,
    options: AggregatorOptions,
    cancel: CancelSignal,
}

impl<P> ChangeSetAggregator<P>
where
    P: ContentProvider + ?Sized + 'static,
{
    /// Create an aggregator with default options and no cancellation.
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            options: AggregatorOptions::default(),
            cancel: CancelSignal::never(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: AggregatorOptions) -> Self {
        self.options = options;
        self
    }

    /// Abort work when `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancelSignal) -> Self {
        self.cancel = cancel;
        self
    }

    /// Current options.
    pub fn options(&self) -> &AggregatorOptions {
        &self.options
    }

    /// Read the complete changed-file listing for a revision pair.
    ///
    /// Pages are requested until the provider reports `done`. Folder entries
    /// and paths already seen on an earlier page are skipped. A page that is
    /// not final but carries no next token, a repeated token, or more than
    /// `max_pages` pages is a [`PatchError::Integrity`].
    pub async fn collect_changed_files<L>(
        &self,
        lister: &L,
        base_revision: &str,
        target_revision: &str,
    ) -> Result<Vec<ChangedFile>, PatchError>
    where
        L: ChangedFileProvider + ?Sized,
    {
        let mut cancel = self.cancel.clone();
        let listing = format!("{}..{}", base_revision, target_revision);
        let mut files = Vec::new();
        let mut seen_paths = HashSet::new();
        let mut seen_tokens = HashSet::new();
        let mut page_token: Option<String> = None;
        let mut pages = 0;

        loop {
            if pages == self.options.max_pages {
                return Err(PatchError::Integrity(format!(
                    "{} did not finish within {} pages",
                    listing, self.options.max_pages
                )));
            }
            pages += 1;

            let page = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(PatchError::Cancelled),
                page = lister.list_changed_files(base_revision, target_revision, page_token.as_deref()) => {
                    page.map_err(|e| provider_error(e, "changed-file listing", &listing))?
                }
            };
            debug!(
                "Page {} of {}: {} entries, done={}",
                pages,
                listing,
                page.files.len(),
                page.done
            );

            for file in page.files {
                if file.is_folder {
                    continue;
                }
                if seen_paths.insert(file.path.clone()) {
                    files.push(file);
                } else {
                    debug!("Skipping duplicate listing entry {}", file.path);
                }
            }

            if page.done {
                break;
            }

            match page.next_page_token {
                Some(token) if seen_tokens.insert(token.clone()) => page_token = Some(token),
                Some(token) => {
                    return Err(PatchError::Integrity(format!(
                        "{} repeated page token {:?}",
                        listing, token
                    )))
                }
                None => {
                    return Err(PatchError::Integrity(format!(
                        "page {} of {} is not final but has no next page token",
                        pages, listing
                    )))
                }
            }
        }

        info!("Collected {} changed files for {}", files.len(), listing);
        Ok(files)
    }

    /// Produce one patch per changed file.
    ///
    /// Failures are isolated per file and reported in
    /// [`ChangeSetReport::failures`]; output keeps the order of `files`.
    /// Only cancellation fails the whole call.
    pub async fn diff_pull_request(
        &self,
        base_revision: &str,
        target_revision: &str,
        files: Vec<ChangedFile>,
    ) -> Result<ChangeSetReport, PatchError> {
        let mut cancel = self.cancel.clone();
        if cancel.is_cancelled() {
            return Err(PatchError::Cancelled);
        }

        let base: Arc<str> = Arc::from(base_revision);
        let target: Arc<str> = Arc::from(target_revision);
        let fetch_limit = Arc::new(Semaphore::new(self.options.max_in_flight_fetches.max(1)));
        let diff_limit = Arc::new(Semaphore::new(self.options.diff_workers.max(1)));

        let mut tasks = JoinSet::new();
        let mut pending = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            if file.is_folder {
                continue;
            }
            pending.push((index, file.path.clone()));

            let job = FileJob {
                provider: Arc::clone(&self.provider),
                file,
                base: Arc::clone(&base),
                target: Arc::clone(&target),
                fetch_limit: Arc::clone(&fetch_limit),
                diff_limit: Arc::clone(&diff_limit),
                options: self.options.patch,
            };
            tasks.spawn(async move { (index, job.run().await) });
        }
        debug!(
            "Diffing {} files for {}..{}",
            pending.len(),
            base_revision,
            target_revision
        );

        let mut outcomes = BTreeMap::new();
        loop {
            let joined = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tasks.abort_all();
                    warn!(
                        "Cancelled diff of {}..{} with {} of {} files finished",
                        base_revision,
                        target_revision,
                        outcomes.len(),
                        pending.len()
                    );
                    return Err(PatchError::Cancelled);
                }
                joined = tasks.join_next() => joined,
            };

            match joined {
                Some(Ok((index, outcome))) => {
                    outcomes.insert(index, outcome);
                }
                Some(Err(e)) => error!("Diff task failed: {}", e),
                None => break,
            }
        }

        let mut report = ChangeSetReport::new(base_revision, target_revision);
        for (index, path) in pending {
            let outcome = outcomes.remove(&index).unwrap_or_else(|| {
                Err(PatchError::Worker {
                    path: path.clone(),
                    message: "task ended without a result".to_string(),
                })
            });

            match outcome {
                Ok(patch) => report.patches.push(FilePatch { index, patch }),
                Err(e) => {
                    warn!("No patch for {}: {}", path, e);
                    report.failures.push(FileFailure::new(index, path, &e));
                }
            }
        }
        report.recalculate_totals();

        info!(
            "Diffed {}..{}: {} patches (+{} -{}), {} failures",
            base_revision,
            target_revision,
            report.patches.len(),
            report.total_additions,
            report.total_removals,
            report.failures.len()
        );
        Ok(report)
    }

    /// Collect the changed-file listing, then diff every file.
    pub async fn diff_change_set<L>(
        &self,
        lister: &L,
        base_revision: &str,
        target_revision: &str,
    ) -> Result<ChangeSetReport, PatchError>
    where
        L: ChangedFileProvider + ?Sized,
    {
        let files = self
            .collect_changed_files(lister, base_revision, target_revision)
            .await?;
        self.diff_pull_request(base_revision, target_revision, files)
            .await
    }

    /// Produce the patch a reviewer comment refers to.
    ///
    /// Both revisions of the file are read concurrently. A file missing at
    /// the base revision counts as empty. A selection without any region is
    /// rejected before anything is fetched.
    pub async fn diff_comment(
        &self,
        selection: &CommentSelection,
        base_revision: &str,
        target_revision: &str,
    ) -> Result<Patch, PatchError> {
        if !selection.has_region() {
            return Err(PatchError::EmptySelection {
                path: selection.file_path.clone(),
            });
        }

        let mut cancel = self.cancel.clone();
        let path = selection.file_path.as_str();

        let reads = async {
            tokio::join!(
                self.provider.read_file(path, Some(base_revision)),
                self.provider.read_file(path, Some(target_revision)),
            )
        };
        let (original, changed) = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(PatchError::Cancelled),
            reads = reads => reads,
        };

        let original = match original {
            Ok(content) => content,
            Err(ProviderError::NotFound(_)) => {
                debug!("{} not found at {}, treating as new", path, base_revision);
                String::new()
            }
            Err(e) => return Err(provider_error(e, path, base_revision)),
        };
        let changed = changed.map_err(|e| provider_error(e, path, target_revision))?;

        let selection = selection.clone();
        let min_context_lines = self.options.min_context_lines;
        let options = self.options.patch;
        tokio::task::spawn_blocking(move || {
            comment_patch(&original, &changed, &selection, min_context_lines, &options)
        })
        .await
        .map_err(|e| PatchError::Worker {
            path: path.to_string(),
            message: e.to_string(),
        })?
    }
}

/// Everything one file's task needs, owned so the task can be spawned.
struct FileJob<P: ?Sized> {
    provider: Arc<P>,
    file: ChangedFile,
    base: Arc<str>,
    target: Arc<str>,
    fetch_limit: Arc<Semaphore>,
    diff_limit: Arc<Semaphore>,
    options: PatchOptions,
}

impl<P> FileJob<P>
where
    P: ContentProvider + ?Sized,
{
    async fn run(self) -> Result<Patch, PatchError> {
        let (original, changed) = tokio::join!(self.fetch_original(), self.fetch_changed());
        let (original, changed) = (original?, changed?);

        let permit = Arc::clone(&self.diff_limit)
            .acquire_owned()
            .await
            .map_err(|_| PatchError::Cancelled)?;
        let path = self.file.path.clone();
        let options = self.options;

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            let left = split_lines(&original);
            let right = split_lines(&changed);
            build_patch(&left, &right, &path, &options)
        })
        .await
        .map_err(|e| PatchError::Worker {
            path: self.file.path.clone(),
            message: e.to_string(),
        })
    }

    async fn fetch_original(&self) -> Result<String, PatchError> {
        if !self.file.exists_at_base {
            debug!("{} is new in {}, original is empty", self.file.path, self.target);
            return Ok(String::new());
        }

        let _permit = self
            .fetch_limit
            .acquire()
            .await
            .map_err(|_| PatchError::Cancelled)?;
        match self.provider.read_file(&self.file.path, Some(&self.base)).await {
            Ok(content) => Ok(content),
            Err(ProviderError::NotFound(_)) => {
                debug!("{} not found at {}, original is empty", self.file.path, self.base);
                Ok(String::new())
            }
            Err(e) => Err(provider_error(e, &self.file.path, &self.base)),
        }
    }

    async fn fetch_changed(&self) -> Result<String, PatchError> {
        let _permit = self
            .fetch_limit
            .acquire()
            .await
            .map_err(|_| PatchError::Cancelled)?;
        self.provider
            .read_file(&self.file.path, Some(&self.target))
            .await
            .map_err(|e| provider_error(e, &self.file.path, &self.target))
    }
}

fn provider_error(error: ProviderError, path: &str, revision: &str) -> PatchError {
    match error {
        ProviderError::NotFound(_) => PatchError::NotFound {
            path: path.to_string(),
            revision: revision.to_string(),
        },
        ProviderError::Transient(message) => PatchError::Transient {
            path: path.to_string(),
            message,
        },
        ProviderError::Unreadable(message) => PatchError::Unreadable {
            path: path.to_string(),
            message,
        },
    }
}
