//! Server configuration.
//!
//! Settings come from three layers, lowest precedence first: built-in
//! defaults, an optional YAML file, then command-line flags and environment
//! variables (see [`crate::cli`]).
//!
//! ```yaml
//! host: 127.0.0.1
//! port: 8080
//! seed-sample-data: false
//! cors-origins:
//!   - http://localhost:4200
//! log-filter: tracker=debug,tracker_http=debug
//! ```

use crate::error::ConfigError;
use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Default listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port
pub const DEFAULT_PORT: u16 = 8000;

/// Tracing filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "tracker=info,tracker_http=info,tower_http=info";

/// Origins allowed to call the API from a browser by default
pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:4200", "http://frontend:4200"];

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct ServerConfig {
    /// Host or IP address to listen on
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Load the sample issues into the store at startup
    pub seed_sample_data: bool,

    /// Origins allowed by CORS. Empty disables CORS headers.
    pub cors_origins: Vec<String>,

    /// Tracing filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            seed_sample_data: true,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(ToString::to_string).collect(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a YAML file.
    ///
    /// Keys missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file can't be read and
    /// `ConfigError::Parse` if it isn't valid configuration YAML.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_yaml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns the YAML error for malformed input or unknown keys.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// `host:port` string to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the CORS layer for the configured origins.
    ///
    /// Methods and headers mirror the preflight request, which is the
    /// credential-safe equivalent of allowing any.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidOrigin` for an origin that isn't a valid
    /// header value.
    pub fn cors_layer(&self) -> Result<CorsLayer, ConfigError> {
        if self.cors_origins.is_empty() {
            return Ok(CorsLayer::new());
        }

        let origins = self
            .cors_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .map_err(|_| ConfigError::InvalidOrigin(origin.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request())
            .allow_credentials(true))
    }
}
