//! Read-only JSON API over the live telemetry

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::mapper::CoordinateMapper;
use crate::state::StateHandle;

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub state: StateHandle,
    pub mapper: CoordinateMapper,
}

/// Build the dashboard axum router
pub fn build_router(state: StateHandle, mapper: CoordinateMapper) -> Router {
    let dashboard_state = DashboardState { state, mapper };

    Router::new()
        .route("/api/telemetry", get(telemetry_handler))
        .route("/api/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(dashboard_state)
}

async fn telemetry_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let telemetry = dashboard.state.read().await;
    Json(telemetry.snapshot(&dashboard.mapper))
}

async fn stats_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let telemetry = dashboard.state.read().await;
    let stats = telemetry.stats();
    Json(serde_json::json!({
        "session_pings": stats.session_pings,
        "daily_pings": stats.daily_pings,
        "last_five": stats.last_five,
        "last_five_bearings": stats.last_five_bearings,
        "all_time_avg": format!("{:.1}", stats.all_time_avg),
        "all_time_min": stats.display_min(),
        "all_time_max": format!("{:.1}", stats.all_time_max),
        "all_time_samples": stats.all_time_samples,
        "has_history": stats.has_history(),
    }))
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
