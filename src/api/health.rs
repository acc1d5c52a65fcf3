//! Liveness probe plus the state of each result cache slot.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::routes::ApiState;
use crate::state::CacheEntryInfo;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache: Vec<CacheEntryInfo>,
}

pub async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.service.cache_entries(),
    })
}
