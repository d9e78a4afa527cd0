//! Patch configuration
//!
//! Configuration loaded from .pr-patch.toml file.

use anyhow::{bail, Context, Result};
use patch_engine::{
    available_workers, AggregatorOptions, BacktraceMode, PatchOptions, MIN_CONTEXT_LINES,
    SURROUNDING_CONTEXT,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Patch configuration loaded from .pr-patch.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PatchConfig {
    /// Comment regions spanning this many lines or fewer use the whole file
    #[serde(default = "default_min_context_lines")]
    pub min_context_lines: usize,

    /// Context lines kept around each change when condensing
    #[serde(default = "default_surrounding_context")]
    pub surrounding_context: usize,

    /// Condense patches by default
    #[serde(default)]
    pub condense: bool,

    /// Simultaneous content fetches
    #[serde(default = "default_max_in_flight_fetches")]
    pub max_in_flight_fetches: usize,

    /// Simultaneous diff computations (0 = available parallelism)
    #[serde(default)]
    pub diff_workers: usize,

    /// Entries per changed-file listing page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Pages read before a listing is declared inconsistent
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Matrix walk used by the formatter ("compatible" or "exact")
    #[serde(default)]
    pub backtrace: BacktraceMode,

    /// Cancel a whole request after this many seconds (0 = never)
    #[serde(default)]
    pub timeout_secs: u64,
}

fn default_min_context_lines() -> usize {
    MIN_CONTEXT_LINES
}

fn default_surrounding_context() -> usize {
    SURROUNDING_CONTEXT
}

fn default_max_in_flight_fetches() -> usize {
    8
}

fn default_page_size() -> usize {
    100
}

fn default_max_pages() -> usize {
    1000
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            min_context_lines: default_min_context_lines(),
            surrounding_context: default_surrounding_context(),
            condense: false,
            max_in_flight_fetches: default_max_in_flight_fetches(),
            diff_workers: 0,
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            backtrace: BacktraceMode::default(),
            timeout_secs: 0,
        }
    }
}

impl PatchConfig {
    /// Load config from an explicit path, or from the implicit locations
    ///
    /// An explicit path that cannot be read or parsed is an error. Problems
    /// with implicitly found files are logged and defaults are used instead.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let config = Self::load_from_path(path)?;
            log::info!("Loaded config from {}", path.display());
            return Ok(config);
        }

        if let Some((path, content)) = crate::load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Ignoring config file {}: {:#}", path.display(), e);
                }
            }
        }

        log::debug!("Using default config");
        Ok(Self::default())
    }

    /// Load config from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse and validate TOML content
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would stall every request
    pub fn validate(&self) -> Result<()> {
        if self.max_in_flight_fetches == 0 {
            bail!("max_in_flight_fetches must be at least 1");
        }
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        Ok(())
    }

    /// Options for a single patch; `condense` overrides the configured default
    pub fn patch_options(&self, condense: bool) -> PatchOptions {
        PatchOptions {
            backtrace: self.backtrace,
            condense_window: (condense || self.condense).then_some(self.surrounding_context),
        }
    }

    /// Options for a change-set aggregation
    pub fn aggregator_options(&self, condense: bool) -> AggregatorOptions {
        AggregatorOptions {
            patch: self.patch_options(condense),
            min_context_lines: self.min_context_lines,
            max_in_flight_fetches: self.max_in_flight_fetches,
            diff_workers: match self.diff_workers {
                0 => available_workers(),
                n => n,
            },
            max_pages: self.max_pages,
        }
    }

    /// Request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
