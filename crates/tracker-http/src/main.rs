//! Tracker HTTP server binary.

use tracing_subscriber::EnvFilter;
use tracker_http::TrackerServer;
use tracker_http::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let config = cli.resolve().await?;

    // RUST_LOG wins over the configured filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        seed = config.seed_sample_data,
        "Starting tracker-http"
    );

    let server = TrackerServer::new(config).await?;
    server.run().await?;

    Ok(())
}
