//! Bootstrap configuration loading
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority, applied by the binary)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled defaults (fallback)
//!
//! A missing config file is never fatal: a warning is logged and the
//! compiled defaults are used. A config file that exists but cannot be
//! parsed is a [`Error::Config`].

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MMG_CONFIG";

/// Default upstream catalog of animated movies
pub const DEFAULT_CATALOG_URL: &str = "https://api.sampleapis.com/movies/animation";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Address the HTTP server binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Catalog acquisition settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Initial difficulty settings
    #[serde(default)]
    pub game: GameConfig,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog acquisition settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Upstream catalog endpoint returning a JSON array of records
    #[serde(default = "default_catalog_url")]
    pub url: String,

    /// Upper bound for a single image reachability probe
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Upper bound for the catalog fetch itself
    #[serde(default = "default_fetch_timeout_ms")]
    pub fetch_timeout_ms: u64,

    /// Minimum number of validated items before a catalog is published
    #[serde(default = "default_min_required")]
    pub min_required: usize,
}

/// Initial difficulty settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameConfig {
    /// Visible cards per screen
    #[serde(default = "default_number_of_cards")]
    pub number_of_cards: usize,

    /// Size of the working pool drawn from the catalog
    #[serde(default = "default_number_of_movies")]
    pub number_of_movies: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_port() -> u16 {
    5780
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_fetch_timeout_ms() -> u64 {
    15_000
}

fn default_min_required() -> usize {
    4
}

fn default_number_of_cards() -> usize {
    4
}

fn default_number_of_movies() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            catalog: CatalogConfig::default(),
            game: GameConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            probe_timeout_ms: default_probe_timeout_ms(),
            fetch_timeout_ms: default_fetch_timeout_ms(),
            min_required: default_min_required(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            number_of_cards: default_number_of_cards(),
            number_of_movies: default_number_of_movies(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolve the config file location and load it
    ///
    /// With no file anywhere, returns the compiled defaults.
    pub fn resolve(cli_arg: Option<&Path>) -> Result<Self> {
        match resolve_config_path(cli_arg) {
            Some(path) => Self::load(&path),
            None => {
                info!("No config file found, using compiled defaults");
                Ok(Self::default())
            }
        }
    }
}

/// Config file path resolution:
/// 1. Command-line argument
/// 2. `MMG_CONFIG` environment variable
/// 3. `<config_dir>/mmg/config.toml` if it exists
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join("mmg").join("config.toml"))
        .filter(|p| p.exists())
}
