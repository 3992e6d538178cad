//! Claims handlers

use axum::{
    extract::{Query, State},
    Json,
};

use core_kernel::DiagnosisCode;

use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Catalog health
pub async fn health(State(state): State<AppState>) -> Result<Json<ClaimsHealthResponse>, ApiError> {
    let check = state.claims.health().await;
    if !check.is_healthy() {
        return Err(ApiError::ServiceUnavailable(
            check.message.unwrap_or_else(|| "claims catalog unavailable".to_string()),
        ));
    }
    Ok(Json(ClaimsHealthResponse { ok: true }))
}

/// Lists plans
pub async fn list_plans(State(state): State<AppState>) -> Result<Json<Vec<PlanResponse>>, ApiError> {
    let plans = state.claims.list_plans().await?;
    Ok(Json(plans.into_iter().map(Into::into).collect()))
}

/// Lists packages, optionally for one ICD code
pub async fn list_packages(
    State(state): State<AppState>,
    Query(query): Query<PackageQuery>,
) -> Result<Json<Vec<PackageResponse>>, ApiError> {
    let icd_code = query
        .icd_code
        .filter(|code| !code.trim().is_empty())
        .map(DiagnosisCode::new);
    let packages = state.claims.list_packages(icd_code.as_ref(), query.limit).await?;
    Ok(Json(packages.into_iter().map(Into::into).collect()))
}

/// Validates a claim
///
/// Denials, pending pre-authorization and partial approvals are all 200
/// responses; only unknown packages and plans are errors.
pub async fn validate_claim(
    State(state): State<AppState>,
    Json(request): Json<ValidateClaimRequest>,
) -> Result<Json<ClaimDecisionResponse>, ApiError> {
    let claim = request.into_claim_request()?;
    let decision = state.claims.validate(&claim).await?;
    Ok(Json(decision.into()))
}
