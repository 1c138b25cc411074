//! Command-line interface for the server binary.

use crate::config::ServerConfig;
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

/// HTTP API server for an in-memory issue tracker
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tracker-http", version, about)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long, env = "TRACKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Host or IP address to listen on
    #[arg(long, env = "TRACKER_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "TRACKER_PORT")]
    pub port: Option<u16>,

    /// Start with an empty store instead of the sample issues
    #[arg(long)]
    pub no_seed: bool,
}

impl Cli {
    /// Parse command-line arguments.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Resolve the effective configuration.
    ///
    /// Starts from the config file (or defaults when none is given) and
    /// applies any flags on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file can't be read or parsed.
    pub async fn resolve(&self) -> Result<ServerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path).await?,
            None => ServerConfig::default(),
        };

        if let Some(host) = &self.host {
            config.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.no_seed {
            config.seed_sample_data = false;
        }

        Ok(config)
    }
}
