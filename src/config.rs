// File: src/config.rs
use crate::paths::AppPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://fsa-crud-2aa9294fe819.herokuapp.com/api";
pub const DEFAULT_COHORT: &str = "2506-ftb-ct-web-pt";

/// Overrides the computed API url, cohort included.
pub const API_URL_ENV: &str = "PARTY_PLANNER_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub cohort: String,
    pub allow_insecure_certs: bool,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cohort: DEFAULT_COHORT.to_string(),
            allow_insecure_certs: false,
            request_timeout_secs: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::config_file()?)
    }

    /// Reads `path`, or writes the defaults there on first run.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            if let Err(e) = config.save_to(path) {
                log::warn!("Could not write default config: {:#}", e);
            }
            return Ok(config);
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("Could not write {}", path.display()))
    }

    /// `{base_url}/{cohort}`, unless the environment says otherwise.
    pub fn api_url(&self) -> String {
        if let Ok(url) = std::env::var(API_URL_ENV)
            && !url.trim().is_empty()
        {
            return url.trim().trim_end_matches('/').to_string();
        }
        self.configured_api_url()
    }

    fn configured_api_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let cohort = self.cohort.trim_matches('/');
        if cohort.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, cohort)
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}
