//! Odoo connection settings and their discovery.
//!
//! Settings come from the environment first (all four of `ODOO_URL`,
//! `ODOO_DB`, `ODOO_USERNAME`, `ODOO_PASSWORD` must be present), then from
//! the first existing candidate file. Discovery never touches the network.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::error::ConfigError;

pub const ENV_URL: &str = "ODOO_URL";
pub const ENV_DB: &str = "ODOO_DB";
pub const ENV_USERNAME: &str = "ODOO_USERNAME";
pub const ENV_PASSWORD: &str = "ODOO_PASSWORD";
pub const ENV_TIMEOUT: &str = "ODOO_TIMEOUT";

/// Connection parameters for an Odoo instance.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OdooConfig {
    /// Base URL, e.g. `https://erp.example.com`.
    pub url: String,

    /// Database name.
    pub db: String,

    /// Login used for `authenticate`.
    pub username: String,

    /// Password or API key.
    pub password: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Custom Debug implementation to redact the password from logs.
impl std::fmt::Debug for OdooConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OdooConfig")
            .field("url", &self.url)
            .field("db", &self.db)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl OdooConfig {
    /// Build a configuration with the default timeout.
    pub fn new(
        url: impl Into<String>,
        db: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            db: db.into(),
            username: username.into(),
            password: password.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Load from the process environment or the default candidate files.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(|name| std::env::var(name).ok(), &Self::candidate_paths())
    }

    /// Load using an explicit environment lookup and candidate file list.
    pub fn load_from<F>(env: F, candidates: &[PathBuf]) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(config) = Self::from_env_lookup(&env)? {
            info!("Odoo configuration loaded from environment");
            return Ok(config);
        }

        for path in candidates {
            if path.is_file() {
                let config = Self::from_file(path)?;
                info!("Odoo configuration loaded from {}", path.display());
                return Ok(config);
            }
            debug!("No Odoo configuration at {}", path.display());
        }

        Err(ConfigError::NotFound {
            searched: candidates.to_vec(),
        })
    }

    /// Files searched when the environment is incomplete, in order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./odoo_config.json")];
        if let Some(home) = std::env::var_os("HOME") {
            let home = PathBuf::from(home);
            paths.push(home.join(".config").join("odoo").join("config.json"));
            paths.push(home.join(".odoo_config.json"));
        }
        paths
    }

    /// Read a JSON configuration file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.url = normalize_url(&config.url);
        Ok(config)
    }

    fn from_env_lookup<F>(env: &F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (Some(url), Some(db), Some(username), Some(password)) = (
            env(ENV_URL),
            env(ENV_DB),
            env(ENV_USERNAME),
            env(ENV_PASSWORD),
        ) else {
            return Ok(None);
        };

        let timeout_secs = match env(ENV_TIMEOUT) {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_TIMEOUT.to_string(),
                reason: format!("'{}' is not a number of seconds", raw),
            })?,
            None => default_timeout_secs(),
        };

        Ok(Some(Self {
            url: normalize_url(&url),
            db,
            username,
            password,
            timeout_secs,
        }))
    }
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
