//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP fetch behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Upstream source URLs
    #[serde(default)]
    pub sources: SourceConfig,

    /// Output file naming
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if the file is absent or broken.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        if !path.as_ref().exists() {
            log::debug!(
                "No config file at {:?}, using defaults.",
                path.as_ref()
            );
            return Self::default();
        }
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        url::Url::parse(&self.sources.readme_url)
            .map_err(|e| AppError::validation(format!("sources.readme_url is invalid: {e}")))?;
        url::Url::parse(&self.sources.catalog_url)
            .map_err(|e| AppError::validation(format!("sources.catalog_url is invalid: {e}")))?;
        if self.output.json_file.trim().is_empty() {
            return Err(AppError::validation("output.json_file is empty"));
        }
        if self.output.snippet_file.trim().is_empty() {
            return Err(AppError::validation("output.snippet_file is empty"));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Raw-content URLs of the upstream repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// README with the material tables (always fetched)
    #[serde(default = "defaults::readme_url")]
    pub readme_url: String,

    /// Filament catalog JSON (fetched in store mode only)
    #[serde(default = "defaults::catalog_url")]
    pub catalog_url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            readme_url: defaults::readme_url(),
            catalog_url: defaults::catalog_url(),
        }
    }
}

/// Names of the files written into the output directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON array of material records
    #[serde(default = "defaults::json_file")]
    pub json_file: String,

    /// Header snippet included by the firmware's material table
    #[serde(default = "defaults::snippet_file")]
    pub snippet_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_file: defaults::json_file(),
            snippet_file: defaults::snippet_file(),
        }
    }
}

mod defaults {
    const UPSTREAM_RAW: &str =
        "https://raw.githubusercontent.com/queengooborg/Bambu-Lab-RFID-Library/main";

    // Fetch defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; filagen/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    // Source defaults
    pub fn readme_url() -> String {
        format!("{UPSTREAM_RAW}/README.md")
    }
    pub fn catalog_url() -> String {
        format!("{UPSTREAM_RAW}/filaments.json")
    }

    // Output defaults
    pub fn json_file() -> String {
        "materials.json".into()
    }
    pub fn snippet_file() -> String {
        "materials_snippet.h".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.fetch.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = Config::default();
        config.sources.catalog_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_output_name() {
        let mut config = Config::default();
        config.output.snippet_file = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            "[fetch]\n\
             timeout_secs = 10\n",
        )
        .unwrap();
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.fetch.user_agent, defaults::user_agent());
        assert_eq!(config.output.json_file, "materials.json");
    }

    #[test]
    fn load_or_default_on_missing_file() {
        let config = Config::load_or_default("/nonexistent/filagen.toml");
        assert_eq!(config.sources.readme_url, defaults::readme_url());
    }
}
