//! ShiftDesk server binary.

use std::sync::Arc;

use anyhow::Result;
use shiftdesk::api;
use shiftdesk::assistant::{ChatGateway, HttpChatGateway};
use shiftdesk::config::Config;
use shiftdesk::state::{self, AppState};
use shiftdesk::store::{RosterStore, ShiftStore};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shiftdesk=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!(
        listen_addr = %config.listen_addr,
        data_dir = %config.data_dir.display(),
        "starting shiftdesk"
    );

    let roster = RosterStore::new(&config.data_dir);
    let shifts = ShiftStore::new(&config.data_dir);
    let vocabulary = state::load_vocabulary(&config.data_dir, &roster)?;

    let gateway = Arc::new(HttpChatGateway::new(
        &config.assistant,
        roster.clone(),
        shifts.clone(),
    ));
    if !gateway.is_configured() {
        warn!("no assistant key configured; /api/chat will report unavailable");
    }

    let state = AppState::new(roster, shifts, vocabulary, gateway);
    let app = api::create_router(state, &config.assets_dir);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received shutdown signal");
    }
}
