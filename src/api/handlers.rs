//! Request handlers for the dashboard and prediction endpoints.

use axum::{
    extract::{FromRequest, Request, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde_json::{json, Value};

use super::{
    error::{ApiError, ApiResult},
    views, AppState,
};
use crate::{models::PredictionRecord, prediction::RawReadings};

fn is_json(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.contains("application/json"))
}

/// `GET /`
pub async fn index() -> Html<String> {
    Html(views::dashboard_page())
}

/// `POST /predict`
///
/// JSON bodies get the outcome as JSON; form posts from the dashboard get
/// the result page. The response does not wait for the record to be stored.
pub async fn predict(State(state): State<AppState>, request: Request) -> ApiResult<Response> {
    let wants_json = is_json(&request);

    let raw: RawReadings = if wants_json {
        let Json(raw) = Json::<RawReadings>::from_request(request, &state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
        raw
    } else {
        let Form(raw) = Form::<RawReadings>::from_request(request, &state)
            .await
            .map_err(|rejection| ApiError::MalformedBody(rejection.body_text()))?;
        raw
    };

    let submission = state.controller.submit(&raw)?;
    let outcome = submission.outcome.clone();

    if wants_json {
        Ok(Json(outcome).into_response())
    } else {
        Ok(Html(views::result_page(&outcome)).into_response())
    }
}

/// `GET /history`
pub async fn history(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let records = state
        .controller
        .history()
        .await
        .map_err(ApiError::HistoryUnavailable)?;
    Ok(Html(views::history_page(&records, state.display_offset)))
}

/// `GET /api/latest`
pub async fn latest(State(state): State<AppState>) -> ApiResult<Json<Vec<PredictionRecord>>> {
    let records = state
        .controller
        .latest()
        .await
        .map_err(ApiError::LatestUnavailable)?;
    Ok(Json(records))
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
