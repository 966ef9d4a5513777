use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};
use typeahead_mock_server::{FaultInjection, SEARCH_PATH, router};

#[derive(Parser, Debug)]
#[command(
    name = "typeahead-mock-server",
    version,
    about = "Fruit search endpoint with artificial latency and failures"
)]
struct Args {
    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long = "min-latency-ms", value_name = "MS", default_value_t = 300)]
    min_latency_ms: u64,
    #[arg(long = "max-latency-ms", value_name = "MS", default_value_t = 1000)]
    max_latency_ms: u64,
    /// Probability of answering with a 500.
    #[arg(long = "failure-rate", value_name = "RATE", default_value_t = 0.15)]
    failure_rate: f64,
    /// Seed the injection RNG for reproducible runs.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut injection = FaultInjection::new(
        args.min_latency_ms,
        args.max_latency_ms,
        args.failure_rate,
    )
    .context("invalid fault injection settings")?;
    if let Some(seed) = args.seed {
        injection = injection.with_seed(seed);
    }

    let address = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(
        "Mock server listening on http://{}{}",
        listener.local_addr()?,
        SEARCH_PATH
    );
    tracing::info!(
        min_latency_ms = args.min_latency_ms,
        max_latency_ms = args.max_latency_ms,
        failure_rate = args.failure_rate,
        "fault injection configured"
    );

    axum::serve(listener, router(Arc::new(injection)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("typeahead_mock_server=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl+C: {err}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
}
