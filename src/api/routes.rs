use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::{debug, error, info};

use crate::api::health::get_health;
use crate::config::cache_keys;
use crate::error::AppError;
use crate::filter::{filter_daily_data, filter_from_segments};
use crate::service::LotteryService;

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<LotteryService>,
}

/// Path parameter names of the daily route, in segment order.
const DAILY_PARAMS: [&str; 3] = ["param1", "param2", "param3"];

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/lottery-results", get(get_lottery_results))
        .route("/api/live-lotto-results", get(get_live_lotto_results))
        .route("/api/daily-lotto-results", get(get_daily_lotto_results))
        .route("/api/daily-lotto-results/:param1", get(get_daily_lotto_results_filtered))
        .route(
            "/api/daily-lotto-results/:param1/:param2",
            get(get_daily_lotto_results_filtered),
        )
        .route(
            "/api/daily-lotto-results/:param1/:param2/:param3",
            get(get_daily_lotto_results_filtered),
        )
        .route("/health", get(get_health))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Legacy endpoint. An empty sheet is a 404 here rather than a 500.
async fn get_lottery_results(State(state): State<ApiState>) -> Response {
    match state.service.realtime_results(cache_keys::LOTTERY_RESULTS).await {
        Ok(results) => {
            info!("Sending processed data, entries: {}", results.len());
            Json(results.as_slice()).into_response()
        }
        Err(AppError::EmptySource(range)) => {
            info!(range = %range, "No data found, responding 404");
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "error": "No data found." })),
            )
                .into_response()
        }
        Err(e) => {
            error!("Error fetching data: {e}");
            e.into_response()
        }
    }
}

async fn get_live_lotto_results(State(state): State<ApiState>) -> Response {
    match state
        .service
        .realtime_results(cache_keys::REALTIME_LOTTERY_RESULTS)
        .await
    {
        Ok(results) => Json(results.as_slice()).into_response(),
        Err(e) => {
            error!("Error fetching live lotto results: {e}");
            e.into_response()
        }
    }
}

async fn get_daily_lotto_results(State(state): State<ApiState>) -> Response {
    daily_response(&state, &[]).await
}

async fn get_daily_lotto_results_filtered(
    State(state): State<ApiState>,
    Path(params): Path<HashMap<String, String>>,
) -> Response {
    let segments: Vec<&str> = DAILY_PARAMS
        .iter()
        .filter_map(|name| params.get(*name).map(String::as_str))
        .collect();
    daily_response(&state, &segments).await
}

async fn daily_response(state: &ApiState, segments: &[&str]) -> Response {
    let filter = filter_from_segments(segments);
    debug!(?filter, "Daily lotto filter");

    match state.service.daily_results().await {
        Ok(results) => {
            if filter.is_empty() {
                return Json(results.as_slice()).into_response();
            }
            let matched = filter_daily_data(&results, &filter);
            info!(total = results.len(), matched = matched.len(), "Filtered daily results");
            Json(matched).into_response()
        }
        Err(e) => {
            error!("Error fetching daily lotto results: {e}");
            e.into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
