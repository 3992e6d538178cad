//! Hybrid assessment handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use domain_assessment::{AssessmentRequest, HybridAssessment};

use crate::{error::ApiError, AppState};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "engine": "rule_engine",
        "advisor_configured": state.assessment.has_advisor(),
    }))
}

pub async fn hybrid_assessment(
    State(state): State<AppState>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<HybridAssessment>, ApiError> {
    let assessment = state.assessment.assess(&request).await?;
    Ok(Json(assessment))
}
