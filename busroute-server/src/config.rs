//! Server configuration

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use busroute_core::TransitModelConfig;
use serde::Deserialize;

use crate::error::ServerError;

/// Server settings, read from TOML and overridable from the command line
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to listen on
    pub listen: SocketAddr,
    /// JSON bus catalogue to load at startup
    pub catalogue_path: PathBuf,
    /// Requests running longer than this are aborted (seconds)
    pub request_timeout_secs: u64,
    /// Maximum number of requests served at once
    pub concurrency_limit: usize,
}

impl ServerConfig {
    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Config`] for malformed TOML or unknown keys
    pub fn from_toml_str(document: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(document)?)
    }

    /// Read a TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self, ServerError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn transit_model_config(&self) -> TransitModelConfig {
        TransitModelConfig::new(&self.catalogue_path)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 3000)),
            catalogue_path: PathBuf::from("catalogue.json"),
            request_timeout_secs: 10,
            concurrency_limit: 256,
        }
    }
}
