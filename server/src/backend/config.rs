//! # Server Configuration
//!
//! Settings are resolved in three steps, later ones winning:
//!
//! 1. Built-in defaults
//! 2. An optional YAML file (`BILL_SPLITTER_CONFIG`, else `bill_splitter.yaml`
//!    in the working directory when it exists)
//! 3. Environment variables
//!
//! ## YAML Format
//!
//! ```yaml
//! host: "0.0.0.0"
//! port: 3000
//! data_dir: "data"
//! static_dir: "public"
//! edit_password: "ADMIN"
//! cors_origin: "http://localhost:8080"
//! default_roster: [SHUBHAM, KUNAL, RUPAM]
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::backend::domain::rollover::default_roster;

pub const CONFIG_PATH_ENV: &str = "BILL_SPLITTER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "bill_splitter.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `bills.json`
    pub data_dir: PathBuf,
    /// Front-end assets; `None` disables static serving
    pub static_dir: Option<PathBuf>,
    pub edit_password: String,
    /// Single allowed origin; `None` allows any
    pub cors_origin: Option<String>,
    /// Roster used for a new month when nothing is stored yet
    pub default_roster: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("data"),
            static_dir: Some(PathBuf::from("public")),
            edit_password: "ADMIN".to_string(),
            cors_origin: None,
            default_roster: default_roster(),
        }
    }
}

impl AppConfig {
    /// Resolve the configuration from the process environment
    pub fn load() -> Result<Self> {
        let path = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(PathBuf::from(path)),
            Err(_) => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                fallback.exists().then_some(fallback)
            }
        };

        let mut config = match path {
            Some(path) => Self::from_yaml_file(&path)?,
            None => {
                debug!("No config file, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        info!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment overrides. `lookup` is `std::env::var` outside tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("Invalid PORT '{}'", port))?;
        }
        if let Some(host) = lookup("BILL_SPLITTER_HOST") {
            self.host = host;
        }
        if let Some(dir) = lookup("BILL_SPLITTER_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("BILL_SPLITTER_STATIC_DIR") {
            self.static_dir = if dir.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }
        if let Some(password) = lookup("BILL_SPLITTER_EDIT_PASSWORD") {
            self.edit_password = password;
        }
        if let Some(origin) = lookup("BILL_SPLITTER_CORS_ORIGIN") {
            self.cors_origin = if origin.trim().is_empty() {
                None
            } else {
                Some(origin.trim().to_string())
            };
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
