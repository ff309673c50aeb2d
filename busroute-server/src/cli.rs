//! Command line arguments

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::ServerConfig;
use crate::error::ServerError;

/// Bus route planner HTTP server
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on, overrides the configuration file
    #[arg(short, long)]
    pub listen: Option<SocketAddr>,

    /// Bus catalogue JSON, overrides the configuration file
    #[arg(long)]
    pub catalogue: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Maximum number of concurrent requests
    #[arg(long)]
    pub concurrency_limit: Option<usize>,
}

impl Cli {
    /// Configuration file (or defaults) with command line overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded
    pub fn into_config(self) -> Result<ServerConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(listen) = self.listen {
            config.listen = listen;
        }
        if let Some(catalogue) = self.catalogue {
            config.catalogue_path = catalogue;
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(limit) = self.concurrency_limit {
            config.concurrency_limit = limit;
        }
        Ok(config)
    }
}
