//! HTTP server setup.
//!
//! [`TrackerServer`] owns the shared store and the resolved configuration,
//! seeds sample data on construction if asked to, and serves the API until
//! Ctrl-C.

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::routes::{self, AppState};
use axum::Router;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracker::seed::seed_sample_data;
use tracker::storage::{SharedStorage, into_shared, new_in_memory_storage};

/// The tracker HTTP server.
pub struct TrackerServer {
    config: ServerConfig,
    storage: SharedStorage,
}

impl TrackerServer {
    /// Create a server over a fresh in-memory store.
    ///
    /// # Errors
    ///
    /// Returns an error if seeding the sample issues fails.
    pub async fn new(config: ServerConfig) -> Result<Self, StartupError> {
        let mut storage = new_in_memory_storage();
        if config.seed_sample_data {
            seed_sample_data(storage.as_mut()).await?;
        }

        Ok(Self {
            config,
            storage: into_shared(storage),
        })
    }

    /// The shared store backing this server.
    #[must_use]
    pub fn storage(&self) -> SharedStorage {
        self.storage.clone()
    }

    /// Build the full application router, CORS included.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured CORS origin is invalid.
    pub fn router(&self) -> Result<Router, StartupError> {
        let cors = self.config.cors_layer()?;
        Ok(routes::router(AppState::new(self.storage())).layer(cors))
    }

    /// Bind the configured address and serve until shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error if the address can't be bound or the server fails.
    pub async fn run(self) -> Result<(), StartupError> {
        let app = self.router()?;
        let address = self.config.bind_address();

        let listener = TcpListener::bind(&address)
            .await
            .map_err(|source| StartupError::Bind {
                address: address.clone(),
                source,
            })?;
        info!(%address, "Tracker API listening");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(StartupError::Serve)?;

        info!("Tracker API stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            // Without a signal handler the only way out is killing the process.
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    }
}
