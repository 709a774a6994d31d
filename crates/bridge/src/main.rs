use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

use common::config::BridgeConfig;
use common::{logger, shutdown};
use relay::Relay;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let config = BridgeConfig::from_env()?;
    logger::setup_logger(&config.log_filter);
    info!("Signal bridge starting up...");

    // Nothing is served until downstream has a socket to connect to.
    let relay = Arc::new(
        Relay::bind(&config.relay_endpoint)
            .await
            .context("relay channel could not bind")?,
    );

    let listener = TcpListener::bind(config.http_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", config.http_addr))?;

    let (trigger, shutdown) = shutdown::channel();
    tokio::spawn(shutdown::listen_for_signals(trigger));

    let served = ingress::serve(listener, relay.clone(), shutdown).await;

    if let Err(e) = relay.close().await {
        error!("Failed to close relay: {}", e);
    }
    served.context("HTTP server failed")?;

    info!("Signal bridge stopped");
    Ok(())
}
