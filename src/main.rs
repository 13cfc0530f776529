// src/main.rs

use seopulse::config::Config;
use seopulse::{lifecycle, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    lifecycle::init_logging();

    let config = Config::from_env();
    let state = lifecycle::build_state(&config)?;
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
