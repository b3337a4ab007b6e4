use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Env var naming a config file, checked when no --config flag is given.
pub const CONFIG_PATH_ENV: &str = "CITYWEATHER_CONFIG";

/// Env vars overriding individual fields, applied after the file is read.
pub const API_KEY_ENV: &str = "CITYWEATHER_API_KEY";
pub const BASE_URL_ENV: &str = "CITYWEATHER_BASE_URL";
pub const LISTEN_ADDR_ENV: &str = "CITYWEATHER_LISTEN_ADDR";

const DEFAULT_CONFIG_FILE: &str = "cityweather.toml";

/// Service configuration: upstream credentials and the listen address.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services"
/// listen_addr = "0.0.0.0:8080"
/// request_timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API key. No default: the service refuses to start without one.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            listen_addr: default_listen_addr(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration: explicit path, then `CITYWEATHER_CONFIG`, then
    /// `./cityweather.toml` if present, then env vars alone. Env overrides
    /// win over file values. Fails if no API key is configured anywhere.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match Self::resolve_path(path) {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };

        cfg.apply_env_overrides();
        cfg.validate()?;

        Ok(cfg)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(p) = explicit {
            return Some(p.to_path_buf());
        }
        if let Ok(p) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(p));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = env::var(API_KEY_ENV) {
            self.api_key = key;
        }
        if let Ok(url) = env::var(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Ok(addr) = env::var(LISTEN_ADDR_ENV) {
            self.listen_addr = addr;
        }
    }

    /// The API key is a credential; there is deliberately no fallback value.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(anyhow!(
                "No upstream API key configured.\n\
                 Hint: set `api_key` in the config file or export {API_KEY_ENV}."
            ));
        }

        Ok(())
    }
}
