//! Batch job configuration
//!
//! Directory layout, forecast API endpoint, and the city catalog,
//! loaded from a TOML file with full defaults when none is present.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw fetch output directory
    pub data_dir: PathBuf,

    /// Per-city analysis output directory
    pub results_dir: PathBuf,

    /// Combined dataset path
    pub aggregated_file: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            results_dir: PathBuf::from("./results"),
            aggregated_file: PathBuf::from("./aggregated_data.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the per-location forecast documents hang off
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.weathercast.example/v1/forecasts".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub api: ApiConfig,

    /// City name -> location identifier consumed by the forecast client
    pub cities: BTreeMap<String, String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppConfig {
    /// Load configuration from the TRIPCAST_CONFIG path (TOML) if
    /// present, with built-in defaults otherwise
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("TRIPCAST_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from an explicit path; a missing file yields pure defaults.
    /// An empty `[cities]` table falls back to the built-in catalog.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut cfg = if path.exists() {
            toml::from_str::<AppConfig>(&fs::read_to_string(path)?)?
        } else {
            AppConfig::default()
        };

        if cfg.cities.is_empty() {
            cfg.cities = default_catalog();
        }
        Ok(cfg)
    }
}

/// Built-in city catalog used when the config carries none
pub fn default_catalog() -> BTreeMap<String, String> {
    [
        ("MOSCOW", "moscow"),
        ("PARIS", "paris"),
        ("LONDON", "london"),
        ("BERLIN", "berlin"),
        ("BEIJING", "beijing"),
        ("KAZAN", "kazan"),
        ("SPETERSBURG", "spetersburg"),
        ("VOLGOGRAD", "volgograd"),
        ("NOVOSIBIRSK", "novosibirsk"),
        ("KALININGRAD", "kaliningrad"),
        ("ABUDHABI", "abudhabi"),
        ("WARSZAWA", "warszawa"),
        ("BUCHAREST", "bucharest"),
        ("ROMA", "roma"),
        ("CAIRO", "cairo"),
    ]
    .into_iter()
    .map(|(name, slug)| (name.to_string(), slug.to_string()))
    .collect()
}
