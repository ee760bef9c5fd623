//! Configuration management.
//!
//! Configuration is read from `~/.config/gleaner/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. Missing fields fall back to their defaults, so a partial file
//! is fine.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::app::error::{GleanerError, Result};

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub retriever: RetrieverConfig,
}

/// Timing and proxy settings for the retrieval loop.
///
/// The defaults were tuned against textise.net's undocumented rate
/// limiting; change them only if links start timing out or the proxy
/// starts serving bot checks.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrieverConfig {
    /// URL prefix the target link is appended to. The trailing `https%253A`
    /// is part of the proxy's query format, not a typo.
    pub proxy_prefix: String,

    /// Wall-clock deadline per link before it is skipped (default: 15)
    pub timeout_secs: u64,

    /// Pause between element polls in milliseconds (default: 200)
    pub poll_interval_ms: u64,

    /// Minimum sleep between links in milliseconds (default: 900)
    pub jitter_min_ms: u64,

    /// Maximum sleep between links in milliseconds (default: 1300)
    pub jitter_max_ms: u64,

    /// How many lines of the probe sample to show for confirmation (default: 30)
    pub preview_lines: usize,

    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,
}

impl Default for RetrieverConfig {
    fn default() -> Self {
        Self {
            proxy_prefix: "https://www.textise.net/showText.aspx?strURL=https%253A".to_string(),
            timeout_secs: 15,
            poll_interval_ms: 200,
            jitter_min_ms: 900,
            jitter_max_ms: 1300,
            preview_lines: 30,
            headless: true,
        }
    }
}

impl RetrieverConfig {
    /// Get the per-link deadline as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the poll interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            GleanerError::Config(format!("{}: {}", config_path.display(), e))
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/gleaner/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| GleanerError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("gleaner").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(Self::default_config_content().as_bytes())?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Gleaner configuration
#
# Timing constants below were tuned against textise.net. The jitter keeps
# the proxy's bot protection from triggering; the timeout decides when a
# link is skipped.

[retriever]
# URL prefix each link is appended to.
proxy_prefix = "https://www.textise.net/showText.aspx?strURL=https%253A"

# Per-link deadline in seconds. Links that produce no text within this
# window are recorded as discarded.
timeout_secs = 15

# Pause between element polls, in milliseconds.
poll_interval_ms = 200

# Sleep between links is drawn uniformly from [jitter_min_ms, jitter_max_ms].
jitter_min_ms = 900
jitter_max_ms = 1300

# How many lines of the sample page to show when confirming a locator.
preview_lines = 30

# Set to false to watch the browser work.
headless = true
"##
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = RetrieverConfig::default();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.poll_interval_ms, 200);
        assert_eq!(config.jitter_min_ms, 900);
        assert_eq!(config.jitter_max_ms, 1300);
        assert_eq!(config.preview_lines, 30);
        assert!(config.headless);
        assert!(config.proxy_prefix.starts_with("https://www.textise.net/"));
    }

    #[test]
    fn test_duration_helpers() {
        let config = RetrieverConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.poll_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [retriever]
            timeout_secs = 30
            headless = false
            "#,
        )
        .unwrap();

        assert_eq!(config.retriever.timeout_secs, 30);
        assert!(!config.retriever.headless);
        // Untouched fields keep their defaults
        assert_eq!(config.retriever.jitter_min_ms, 900);
        assert_eq!(config.retriever.preview_lines, 30);
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.retriever.timeout_secs, 15);
    }

    #[test]
    fn test_default_content_parses() {
        let content = Config::default_config_content();
        let config: Config = toml::from_str(&content).unwrap();
        assert_eq!(config.retriever.timeout_secs, 15);
        assert_eq!(config.retriever.jitter_max_ms, 1300);
    }
}
