//! GeneraList skill backend
//!
//! Main application entry point

use std::sync::Arc;
use anyhow::Context;
use tracing::info;

use GeneraList::{
    config::Settings,
    handlers::{create_router, shutdown_signal, Dispatcher},
    state::AppContext,
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("loading settings")?;
    settings.validate().context("validating settings")?;

    // Initialize logging; the guard flushes the log file on exit
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", GeneraList::info());

    // Connect the stores
    let bind_address = settings.bind_address();
    let ctx = AppContext::from_settings(settings)
        .await
        .context("connecting stores")?;
    info!(backend = ?ctx.settings.storage.backend, "Stores ready");

    let app = create_router(Arc::new(Dispatcher::new(ctx)));

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding {}", bind_address))?;
    info!("Listening on {}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("GeneraList has been shut down.");
    Ok(())
}
