use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use relay_engine::RelaySettings;
use serde::Deserialize;

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum LogDestination {
    #[default]
    Terminal,
    File,
    Both,
}

/// Server settings, read from an optional RON file. Missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub catalog_path: PathBuf,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub redirect_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            catalog_path: PathBuf::from("data/keywords.json"),
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from("relay_server.log"),
            connect_timeout_secs: None,
            request_timeout_secs: None,
            redirect_limit: 0,
        }
    }
}

impl ServerConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_ron(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_ron(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            redirect_limit: self.redirect_limit,
        }
    }
}
