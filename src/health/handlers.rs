use axum::{extract::State, routing::get, Json, Router};
use time::OffsetDateTime;
use tracing::instrument;

use super::dto::HealthResponse;
use crate::state::AppState;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

fn probe(state: &AppState, status: &'static str) -> HealthResponse {
    HealthResponse {
        status,
        timestamp: OffsetDateTime::now_utc(),
        version: VERSION,
        uptime: state.started_at.elapsed().as_secs_f64(),
    }
}

#[instrument(skip(state))]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(probe(&state, "healthy"))
}

#[instrument(skip(state))]
pub async fn readiness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(probe(&state, "ready"))
}

#[instrument(skip(state))]
pub async fn liveness_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(probe(&state, "alive"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_healthy_with_nonnegative_uptime() {
        let state = AppState::fake();
        let Json(body) = health_check(State(state)).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.version, VERSION);
        assert!(body.uptime >= 0.0);
    }

    #[tokio::test]
    async fn probes_report_distinct_statuses() {
        let state = AppState::fake();
        let Json(ready) = readiness_check(State(state.clone())).await;
        let Json(live) = liveness_check(State(state)).await;
        assert_eq!(ready.status, "ready");
        assert_eq!(live.status, "alive");
    }
}
