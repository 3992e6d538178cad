//! Allergy mapper handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};
use validator::Validate;

use domain_allergy::DrugMapping;

use crate::dto::allergy::MapRequest;
use crate::{error::ApiError, AppState};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Maps a drug to herb candidates; served on both POST and PUT
pub async fn map_drug(
    State(state): State<AppState>,
    Json(request): Json<MapRequest>,
) -> Result<Json<DrugMapping>, ApiError> {
    request.validate()?;
    let mapping = state.allergy.map_drug(request.drug.trim()).await?;
    Ok(Json(mapping))
}
