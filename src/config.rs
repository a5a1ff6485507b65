//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! We look for a waymark.toml in the working directory and, if present, load settings
//! from there. Missing keys take their defaults; a file that fails to parse is
//! reported and ignored.

use crate::error::ConfigError;
use facet::Facet;
use std::fs;
use std::path::Path;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = "waymark.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// Reader preferences loaded from waymark.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 3)]
    /// Rows ahead of the top edge at which a heading counts as reached.
    pub lookahead: i64,
    #[facet(default = 100)]
    /// Maximum column width the document is wrapped at.
    pub wrap_width: usize,
    #[facet(default = 32)]
    /// Width of the contents pane.
    pub toc_width: u16,
    #[facet(default = 16)]
    /// Longest wait for input before a frame is run, in milliseconds.
    pub frame_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lookahead: 3,
            wrap_width: 100,
            toc_width: 32,
            frame_ms: 16,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from waymark.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        Self::parse(&contents).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "ignoring config: {e}");
            Self::default()
        })
    }

    /// Parse configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid config.
    pub fn parse(contents: &str) -> Result<Self, ConfigError<'_>> {
        Ok(facet_toml::from_str::<Self>(contents)?)
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
