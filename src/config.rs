use crate::common::constants::{
    CARD_CLASS, DATE_CLASS, DEFAULT_CONFIG_FILE, DEFAULT_HOST_PREFIX, DEFAULT_OUTPUT_PATH,
    DEFAULT_PAGE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, ENV_HOST_PREFIX, ENV_OUTPUT_PATH,
    ENV_PAGE_URL, LINK_CLASS, LOCATION_CLASS,
};
use crate::common::error::{Result, ScraperError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Everything one run needs. Built from defaults, then an optional TOML
/// file, then environment variables; the CLI applies its flags last.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub page_url: String,
    /// Prepended to each server-relative link
    pub host_prefix: String,
    pub output_path: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// Abort on the first malformed card instead of skipping it
    pub strict: bool,
    pub selectors: Selectors,
}

/// Marker classes identifying each part of a listing card
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Selectors {
    pub card: String,
    pub date: String,
    pub location: String,
    pub link: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page_url: DEFAULT_PAGE_URL.to_string(),
            host_prefix: DEFAULT_HOST_PREFIX.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict: false,
            selectors: Selectors::default(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            card: CARD_CLASS.to_string(),
            date: DATE_CLASS.to_string(),
            location: LOCATION_CLASS.to_string(),
            link: LINK_CLASS.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `mbta_scraper.toml` in the
    /// working directory when no path is given.
    ///
    /// An explicitly named file must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (config_path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path).map_err(|e| {
            ScraperError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;
        info!("Loaded config from {}", config_path.display());
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Apply `MBTA_PAGE_URL`, `MBTA_HOST_PREFIX` and `MBTA_OUTPUT_PATH` from
    /// the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(ENV_PAGE_URL) {
            self.page_url = url;
        }
        if let Some(host) = non_empty(ENV_HOST_PREFIX) {
            self.host_prefix = host;
        }
        if let Some(path) = non_empty(ENV_OUTPUT_PATH) {
            self.output_path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_url.trim().is_empty() {
            return Err(ScraperError::Config("page_url must not be empty".into()));
        }
        if self.host_prefix.trim().is_empty() {
            return Err(ScraperError::Config("host_prefix must not be empty".into()));
        }
        if self.output_path.as_os_str().is_empty() {
            return Err(ScraperError::Config("output_path must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(ScraperError::Config("timeout_secs must be positive".into()));
        }
        let s = &self.selectors;
        for (name, class) in [
            ("card", &s.card),
            ("date", &s.date),
            ("location", &s.location),
            ("link", &s.link),
        ] {
            if class.trim().is_empty() || class.contains(char::is_whitespace) {
                return Err(ScraperError::Config(format!(
                    "selectors.{} must be a single class name, got '{}'",
                    name, class
                )));
            }
        }
        Ok(())
    }
}
