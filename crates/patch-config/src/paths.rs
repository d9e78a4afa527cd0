//! Configuration file locations
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/pr-patch/config.toml`
//! - macOS: `~/Library/Application Support/pr-patch/config.toml`
//! - Windows: `%APPDATA%\pr-patch\config.toml`

use std::path::PathBuf;

const APP_NAME: &str = "pr-patch";

/// Config file name looked up in the current directory and in HOME
pub const LOCAL_CONFIG_FILE: &str = ".pr-patch.toml";

/// Get the application config directory, if the platform has one
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME))
}

/// Get path to the app config file in the config directory
pub fn app_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get path to the config file in the current directory
pub fn local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|cwd| cwd.join(LOCAL_CONFIG_FILE))
}

/// Get path to the config file in the home directory
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LOCAL_CONFIG_FILE))
}

/// Every implicit config location, highest priority first
pub fn search_paths() -> Vec<PathBuf> {
    [local_config_path(), app_config_path(), home_config_path()]
        .into_iter()
        .flatten()
        .collect()
}
