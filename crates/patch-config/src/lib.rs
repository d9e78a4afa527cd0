//! Configuration for pr-patch
//!
//! This crate provides:
//! - Config file locations
//! - Configuration file loading (TOML)
//! - Patch configuration (PatchConfig) and its engine options

pub mod config_file;
pub mod patch_config;
pub mod paths;

pub use config_file::load_config_file;
pub use patch_config::PatchConfig;
