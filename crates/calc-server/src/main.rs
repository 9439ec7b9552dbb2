//! Entry point for the calculation service binary.

use std::sync::Arc;

use calc_accrual::HttpAccrualRateProvider;
use calc_core::{AccrualRateProvider, DefaultAccrualRateProvider};
use calc_config::ServiceConfig;
use calc_server::ServiceState;
use clap::Parser;

/// Overrides [`ServiceConfig::load`]'s `PORT`/`SCHEME_REGISTRY_URL` with an
/// explicit flag, the same override relationship `bd`'s subcommand flags
/// have over `.beads/config.yaml`.
#[derive(Debug, Parser)]
struct Cli {
    /// Listening port. Overrides the `PORT` environment variable.
    #[arg(long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut config = ServiceConfig::load()?;
    if let Some(port) = cli.port {
        config.port = port;
    }

    let accrual_provider: Arc<dyn AccrualRateProvider + Send + Sync> =
        match &config.scheme_registry_url {
            Some(url) => Arc::new(HttpAccrualRateProvider::new(url.clone())),
            None => Arc::new(DefaultAccrualRateProvider),
        };

    let state = ServiceState::new(accrual_provider);
    let router = calc_server::build_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!(%addr, "starting calc-server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
