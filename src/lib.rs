pub mod annotator;
pub mod api;
pub mod classifier;
pub mod db;
pub mod models;
pub mod prediction;
pub mod settings;
pub mod utils;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::FixedOffset;

use api::{create_router, AppState};
use classifier::LinearModel;
use db::Database;
use prediction::PredictionController;
use settings::Settings;

/// Process entry point: logging, settings, runtime, then the HTTP server.
pub fn run() -> Result<()> {
    utils::logging::init();

    log::info!("VitalSense starting up...");

    let settings = Settings::from_env().context("Failed to load settings")?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(serve(settings))
}

/// Open storage, load the model and serve until ctrl-c.
pub async fn serve(settings: Settings) -> Result<()> {
    let database = Database::new(settings.database_path.clone())?;

    let model = match &settings.model_path {
        Some(path) => {
            log::info!("Loading model coefficients from {}", path.display());
            LinearModel::from_json_file(path)?
        }
        None => LinearModel::reference(),
    };

    let display_offset = FixedOffset::east_opt(settings.display_utc_offset_minutes * 60)
        .ok_or_else(|| {
            anyhow!(
                "invalid display offset of {} minutes",
                settings.display_utc_offset_minutes
            )
        })?;

    let controller = PredictionController::new(&settings, model, Arc::new(database));
    let app = create_router(AppState {
        controller,
        display_offset,
    });

    let listener = tokio::net::TcpListener::bind(&settings.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", settings.bind_address))?;
    log::info!("Listening on http://{}", settings.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    log::info!("VitalSense shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
