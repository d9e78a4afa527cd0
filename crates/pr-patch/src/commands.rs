//! The `file` and `tree` subcommands.

use anyhow::{bail, Context, Result};
use patch_config::PatchConfig;
use patch_engine::{
    build_patch, comment_patch, render_patches, split_lines, CancelHandle, ChangeSetAggregator,
    ChangeSetReport, CommentSelection, DiffSide, LineRange, Patch,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::local_tree::LocalTreeProvider;
use crate::OutputFormat;

/// Inputs of the `file` subcommand.
#[derive(Debug, Clone)]
pub struct FileRequest {
    pub before: PathBuf,
    pub after: PathBuf,
    pub path: Option<String>,
    pub left: Option<(usize, usize)>,
    pub right: Option<(usize, usize)>,
    pub condense: bool,
}

/// Print the patch between two files. Always succeeds once a patch is built.
pub async fn run_file(config: &PatchConfig, request: &FileRequest, format: OutputFormat) -> Result<bool> {
    let patch = file_patch(config, request).await?;
    match format {
        OutputFormat::Text => println!("{}", patch),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&patch)?),
    }
    Ok(true)
}

/// Print patches for two directory trees. Returns false when any file failed.
pub async fn run_tree(
    config: &PatchConfig,
    base_dir: &Path,
    target_dir: &Path,
    condense: bool,
    format: OutputFormat,
) -> Result<bool> {
    let report = tree_report(config, base_dir, target_dir, condense).await?;

    match format {
        OutputFormat::Text => {
            let rendered = render_patches(report.patches.iter().map(|p| &p.patch));
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    for failure in &report.failures {
        let hint = if failure.retryable { " (retryable)" } else { "" };
        eprintln!("{}: {}{}", failure.path, failure.message, hint);
    }
    Ok(report.is_complete())
}

pub async fn file_patch(config: &PatchConfig, request: &FileRequest) -> Result<Patch> {
    let original = read_optional(&request.before).await?;
    let changed = tokio::fs::read_to_string(&request.after)
        .await
        .with_context(|| format!("Failed to read {}", request.after.display()))?;

    let file_path = request
        .path
        .clone()
        .unwrap_or_else(|| request.after.display().to_string());
    let options = config.patch_options(request.condense);

    if request.left.is_none() && request.right.is_none() {
        let left = split_lines(&original);
        let right = split_lines(&changed);
        return Ok(build_patch(&left, &right, &file_path, &options));
    }

    let mut selection = CommentSelection::new(file_path);
    if let Some((start, end)) = request.left {
        selection = selection.with_side(DiffSide::Left, LineRange::new(start, end)?);
    }
    if let Some((start, end)) = request.right {
        selection = selection.with_side(DiffSide::Right, LineRange::new(start, end)?);
    }
    match comment_patch(
        &original,
        &changed,
        &selection,
        config.min_context_lines,
        &options,
    ) {
        Ok(patch) => Ok(patch),
        Err(e) => {
            log::warn!("{}, falling back to the whole file", e);
            let left = split_lines(&original);
            let right = split_lines(&changed);
            Ok(build_patch(&left, &right, &selection.file_path, &options))
        }
    }
}

pub async fn tree_report(
    config: &PatchConfig,
    base_dir: &Path,
    target_dir: &Path,
    condense: bool,
) -> Result<ChangeSetReport> {
    for dir in [base_dir, target_dir] {
        if !dir.is_dir() {
            bail!("{} is not a directory", dir.display());
        }
    }

    let (handle, signal) = CancelHandle::new();
    let timer = config.timeout().map(|timeout| handle.cancel_after(timeout));
    let interrupt = {
        let handle = handle.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!("Interrupted, cancelling");
                handle.cancel();
            }
        })
    };

    let provider = Arc::new(LocalTreeProvider::new(config.page_size));
    let aggregator = ChangeSetAggregator::new(Arc::clone(&provider))
        .with_options(config.aggregator_options(condense))
        .with_cancel(signal);

    let base = base_dir.to_string_lossy();
    let target = target_dir.to_string_lossy();
    let result = aggregator
        .diff_change_set(provider.as_ref(), &base, &target)
        .await;

    interrupt.abort();
    if let Some(timer) = timer {
        timer.abort();
    }
    result.with_context(|| format!("Failed to diff {} against {}", target, base))
}

/// Read a file, treating a missing one as empty.
async fn read_optional(path: &Path) -> Result<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{} does not exist, treating it as empty", path.display());
            Ok(String::new())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}
