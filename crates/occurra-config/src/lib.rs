//! Configuration loading for Occurra.
//! Reads occurra.toml from the current directory or the path in the OCCURRA_CONFIG env var.
//! A missing file is not an error: every field has a built-in default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const CONFIG_ENV: &str = "OCCURRA_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "occurra.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gbif: GbifConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GbifConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint()     -> String { "https://api.gbif.org/v1/occurrence/search".to_string() }
fn default_timeout_secs() -> u64    { 30 }

impl Default for GbifConfig {
    fn default() -> Self {
        Self { endpoint: default_endpoint(), timeout_secs: default_timeout_secs() }
    }
}

/// Defaults and bounds for the search controls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_species")]
    pub default_species: String,
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    #[serde(default = "default_min_limit")]
    pub min_limit: u32,
    #[serde(default = "default_max_limit")]
    pub max_limit: u32,
    #[serde(default = "default_limit_step")]
    pub limit_step: u32,
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    #[serde(default = "default_max_year")]
    pub max_year: i32,
    #[serde(default = "default_year_range")]
    pub default_year_range: (i32, i32),
    #[serde(default)]
    pub default_bbox: BboxDefaults,
}

fn default_species()    -> String     { "Danaus plexippus".to_string() }
fn default_limit()      -> u32        { 500 }
fn default_min_limit()  -> u32        { 100 }
fn default_max_limit()  -> u32        { 2000 }
fn default_limit_step() -> u32        { 100 }
fn default_min_year()   -> i32        { 1900 }
fn default_max_year()   -> i32        { 2025 }
fn default_year_range() -> (i32, i32) { (2000, 2020) }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_species: default_species(),
            default_limit: default_limit(),
            min_limit: default_min_limit(),
            max_limit: default_max_limit(),
            limit_step: default_limit_step(),
            min_year: default_min_year(),
            max_year: default_max_year(),
            default_year_range: default_year_range(),
            default_bbox: BboxDefaults::default(),
        }
    }
}

impl SearchConfig {
    /// Clamps a requested record limit into the configured slider range.
    pub fn clamp_limit(&self, limit: u32) -> u32 {
        limit.clamp(self.min_limit, self.max_limit)
    }

    /// Clamps a requested year range into the configured slider range.
    pub fn clamp_years(&self, (start, end): (i32, i32)) -> (i32, i32) {
        (
            start.clamp(self.min_year, self.max_year),
            end.clamp(self.min_year, self.max_year),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BboxDefaults {
    #[serde(default = "default_lat_min")]
    pub lat_min: f64,
    #[serde(default = "default_lat_max")]
    pub lat_max: f64,
    #[serde(default = "default_lon_min")]
    pub lon_min: f64,
    #[serde(default = "default_lon_max")]
    pub lon_max: f64,
}

fn default_lat_min() -> f64 { 20.0 }
fn default_lat_max() -> f64 { 50.0 }
fn default_lon_min() -> f64 { -130.0 }
fn default_lon_max() -> f64 { -60.0 }

impl Default for BboxDefaults {
    fn default() -> Self {
        Self {
            lat_min: default_lat_min(),
            lat_max: default_lat_max(),
            lon_min: default_lon_min(),
            lon_max: default_lon_max(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Rows shown in the table tab; the CSV download always has every row.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

fn default_host()         -> String { "127.0.0.1".to_string() }
fn default_port()         -> u16    { 3001 }
fn default_preview_rows() -> usize  { 50 }

impl Default for WebConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), preview_rows: default_preview_rows() }
    }
}

impl Config {
    /// Load configuration from occurra.toml.
    /// Checks OCCURRA_CONFIG first, then the current directory.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_ENV)
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from(&path)
    }

    /// Load from an explicit path, falling back to defaults when the file does not exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.search;
        if s.min_limit == 0 || s.min_limit > s.max_limit {
            return Err(ConfigError::Invalid(format!(
                "search.min_limit ({}) must be >= 1 and <= search.max_limit ({})",
                s.min_limit, s.max_limit
            )));
        }
        if s.limit_step == 0 {
            return Err(ConfigError::Invalid("search.limit_step must be positive".to_string()));
        }
        if s.min_year > s.max_year {
            return Err(ConfigError::Invalid(format!(
                "search.min_year ({}) is after search.max_year ({})",
                s.min_year, s.max_year
            )));
        }
        if s.default_year_range.0 > s.default_year_range.1 {
            return Err(ConfigError::Invalid("search.default_year_range is reversed".to_string()));
        }
        if self.gbif.timeout_secs == 0 {
            return Err(ConfigError::Invalid("gbif.timeout_secs must be positive".to_string()));
        }
        Ok(())
    }
}
