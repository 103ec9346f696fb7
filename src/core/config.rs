use super::error::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Base URL used when `SENTIBOARD_API_URL` is not set
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Request deadline used when `SENTIBOARD_TIMEOUT_SECS` is not set
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "SENTIBOARD_API_URL";
const ENV_FETCH_ON_LOAD: &str = "SENTIBOARD_FETCH_ON_LOAD";
const ENV_TIMEOUT_SECS: &str = "SENTIBOARD_TIMEOUT_SECS";

/// Configuration for sentiboard
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the sentiment-analysis service
    pub api_url: String,
    /// Fixed deadline applied to every request
    pub timeout: Duration,
    /// Whether the dashboard loads the history as soon as it starts
    pub fetch_on_load: bool,
    /// Directory for the dashboard log file
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            fetch_on_load: Self::default_fetch_on_load(),
            data_dir: Self::default_data_dir().unwrap_or_else(|_| PathBuf::from(".sentiboard")),
        }
    }
}

impl Config {
    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| Error::Config("Could not determine data directory".to_string()))
            .map(|dir| dir.join("sentiboard"))
    }

    /// Release builds load history on start; debug builds don't, so a missing
    /// local backend stays quiet during development.
    pub fn default_fetch_on_load() -> bool {
        !cfg!(debug_assertions)
    }

    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|u| !u.trim().is_empty()) {
            config.api_url = url;
        }

        if let Some(raw) = lookup(ENV_FETCH_ON_LOAD) {
            config.fetch_on_load = parse_flag(&raw).ok_or_else(|| {
                Error::Config(format!("{ENV_FETCH_ON_LOAD} must be true or false, got {raw:?}"))
            })?;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                Error::Config(format!("{ENV_TIMEOUT_SECS} must be a number of seconds, got {raw:?}"))
            })?;
            config = config.with_timeout_secs(secs)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Override the base URL
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.api_url = url.into();
        self.validate()?;
        Ok(self)
    }

    /// Override the request deadline
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self> {
        if secs == 0 {
            return Err(Error::Config("Request timeout must be at least one second".to_string()));
        }
        self.timeout = Duration::from_secs(secs);
        Ok(self)
    }

    /// Join a path onto the base URL without doubling slashes
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Path of the log file written while the dashboard owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("sentiboard.log")
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API URL must start with http:// or https://, got {:?}",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
