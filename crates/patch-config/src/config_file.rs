use std::path::{Path, PathBuf};

use crate::paths;

/// Load config file content from the first implicit location that exists
///
/// Searches in:
/// 1. Current working directory as .pr-patch.toml
/// 2. Config directory as pr-patch/config.toml
/// 3. Home directory as .pr-patch.toml
///
/// Returns the path and content if found, None otherwise.
pub fn load_config_file() -> Option<(PathBuf, String)> {
    load_first_of(&paths::search_paths())
}

/// Load the first readable file among `candidates`
pub fn load_first_of(candidates: &[PathBuf]) -> Option<(PathBuf, String)> {
    candidates.iter().find_map(|path| {
        read(path).map(|content| {
            log::debug!("Loaded config from {}", path.display());
            (path.clone(), content)
        })
    })
}

fn read(path: &Path) -> Option<String> {
    std::fs::read_to_string(path).ok()
}
