//! Layout configuration
//!
//! An optional `md2docx.toml` next to the input file (or passed with
//! `--config`) overrides the fixed layout values. Every field has the
//! built-in default, so a partial file or no file at all is fine.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use md2docx_engine::ConvertOptions;

/// Default config file name looked up next to the input
pub const CONFIG_FILE_NAME: &str = "md2docx.toml";

/// Layout settings for a conversion run
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Page content width budget for tables, in twips
    pub content_width: u32,
    /// Minimum table column width, in twips
    pub min_column_width: u32,
    /// Fixed render width for embedded images, in twips
    pub image_width: u32,
    /// Uniform page margin, in twips
    pub page_margin: u32,
    /// Image fetch timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            content_width: options.content_width,
            min_column_width: options.min_column_width,
            image_width: options.image_width,
            page_margin: options.page_margin,
            fetch_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration for a conversion run.
    ///
    /// An explicit `--config` path must exist; without one, a
    /// `md2docx.toml` next to the input is used when present,
    /// otherwise the defaults.
    pub fn load(explicit: Option<&Path>, input: &Path) -> Result<Self> {
        let path: Option<PathBuf> = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => {
                let sibling = input
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(CONFIG_FILE_NAME);
                sibling.exists().then_some(sibling)
            }
        };

        match path {
            Some(p) => {
                let text = fs::read_to_string(&p)
                    .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("Failed to parse config file: {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Translate into the engine's conversion options
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            content_width: self.content_width,
            min_column_width: self.min_column_width,
            image_width: self.image_width,
            page_margin: self.page_margin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_engine() {
        let config = Config::default();
        assert_eq!(config.content_width, 9360);
        assert_eq!(config.min_column_width, 1000);
        assert_eq!(config.image_width, 600);
        assert_eq!(config.page_margin, 1440);
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str("image_width = 800").unwrap();
        assert_eq!(config.image_width, 800);
        assert_eq!(config.content_width, 9360);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let parsed: std::result::Result<Config, _> = toml::from_str("imge_width = 800");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load(None, Path::new("/nonexistent/input.md")).unwrap();
        assert_eq!(config.page_margin, 1440);
    }
}
