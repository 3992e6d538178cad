//! Health check handlers

use std::collections::BTreeMap;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use core_kernel::HealthCheckResult;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Service name to "operational" or "unavailable"
    pub services: BTreeMap<&'static str, &'static str>,
    pub checks: Vec<HealthCheckResult>,
}

async fn run_checks(state: &AppState) -> Vec<(&'static str, HealthCheckResult)> {
    let (claims, allergy) = futures::join!(state.claims.health(), state.allergy.health());
    vec![
        ("allergy_mapper", allergy),
        ("ayush_who_search", state.terminology.health()),
        ("claim_validator", claims),
    ]
}

fn summarize(checks: Vec<(&'static str, HealthCheckResult)>) -> HealthResponse {
    let healthy = checks.iter().all(|(_, check)| check.is_healthy());

    let mut services: BTreeMap<&'static str, &'static str> = checks
        .iter()
        .map(|(name, check)| (*name, if check.is_healthy() { "operational" } else { "unavailable" }))
        .collect();
    // rules only, nothing to probe
    services.insert("predictive_analytics", "operational");

    HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
        checks: checks.into_iter().map(|(_, check)| check).collect(),
    }
}

/// Aggregated service availability
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(summarize(run_checks(&state).await))
}

/// Readiness check (every backing store must answer)
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let response = summarize(run_checks(&state).await);
    if response.status != "healthy" {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }
    Ok(Json(HealthResponse {
        status: "ready".to_string(),
        ..response
    }))
}
