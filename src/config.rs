//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

use crate::constants::parser::DEFAULT_FRONT_MATTER_LINES;
use crate::constants::source::DEFAULT_CORPUS;
use crate::corpus::ParseOptions;
use crate::error::{Error, Result};

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path or URL of the corpus text
    pub corpus_location: String,
    /// Leading lines reserved as front matter
    pub front_matter_lines: usize,
    /// Directory holding the parsed-corpus cache
    pub cache_dir: Option<PathBuf>,
    /// Whether the cache is consulted and written
    pub cache_enabled: bool,
}

impl Config {
    /// Parser options derived from this configuration.
    pub const fn parse_options(&self) -> ParseOptions {
        ParseOptions::with_front_matter_lines(self.front_matter_lines)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus_location: DEFAULT_CORPUS.to_string(),
            front_matter_lines: DEFAULT_FRONT_MATTER_LINES,
            cache_dir: default_cache_dir(),
            cache_enabled: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();

        let mut config = Self::default();

        if let Ok(location) = env::var("VERSEFINDER_CORPUS") {
            if !location.trim().is_empty() {
                config.corpus_location = location.trim().to_string();
            }
        }

        if let Ok(lines) = env::var("VERSEFINDER_FRONT_MATTER_LINES") {
            config.front_matter_lines = parse_line_count(&lines)?;
        }

        if let Ok(dir) = env::var("VERSEFINDER_CACHE_DIR") {
            config.cache_dir = Some(PathBuf::from(shellexpand::tilde(&dir).to_string()));
        }

        if let Ok(flag) = env::var("VERSEFINDER_NO_CACHE") {
            config.cache_enabled = !is_truthy(&flag);
        }

        Ok(config)
    }

    /// Override the corpus location (e.g. from the command line)
    #[must_use]
    pub fn with_corpus_location(mut self, location: impl Into<String>) -> Self {
        self.corpus_location = location.into();
        self
    }
}

/// Platform data directory for the cache, e.g. `~/.local/share/versefinder`.
fn default_cache_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(env!("CARGO_PKG_NAME")))
}

fn parse_line_count(value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|_| {
        Error::config(
            format!("VERSEFINDER_FRONT_MATTER_LINES is not a line count: {value:?}"),
            "Set it to a whole number such as 260",
        )
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
