//! HTTP surface: dashboard pages, the prediction endpoint and the chart feed.

mod error;
mod handlers;
mod views;

use axum::{
    routing::{get, post},
    Router,
};
use chrono::FixedOffset;

use crate::prediction::PredictionController;

pub use error::{ApiError, ApiResult, ErrorBody};

#[derive(Clone)]
pub struct AppState {
    pub controller: PredictionController,
    /// Offset applied to timestamps on the history page.
    pub display_offset: FixedOffset,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/predict", post(handlers::predict))
        .route("/history", get(handlers::history))
        .route("/api/latest", get(handlers::latest))
        .route("/health", get(handlers::health))
        .with_state(state)
}
