//! AYUSH to WHO terminology handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use validator::Validate;

use domain_terminology::service::DEFAULT_THRESHOLD;
use domain_terminology::{HealthPassport, WordSearchOutcome};

use crate::dto::ayush::*;
use crate::{error::ApiError, AppState};

/// Service description
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "AYUSH ↔ WHO Semantic Search API",
        "version": env!("CARGO_PKG_VERSION"),
        "features": ["fuzzy_search", "semantic_search", "health_passport"],
        "status": "operational",
        "endpoints": {
            "search_mappings": "/search/{term}",
            "semantic_search": "/search (POST)",
            "demo_passport": "/demo/health-passport",
            "health_check": "/health"
        }
    }))
}

pub async fn health(State(state): State<AppState>) -> Json<TerminologyHealthResponse> {
    let loaded = state.terminology.mappings_loaded();
    Json(TerminologyHealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        semantic_search: if loaded > 0 { "operational" } else { "degraded" },
        database: if loaded > 0 { "loaded" } else { "error" },
        total_mappings: loaded,
    })
}

/// Word search over both term columns
pub async fn search_term(
    State(state): State<AppState>,
    Path(term): Path<String>,
    Query(query): Query<ThresholdQuery>,
) -> Result<Json<WordSearchResponse>, ApiError> {
    let threshold = match query.threshold {
        Some(value) => u8::try_from(value)
            .map_err(|_| ApiError::validation("threshold must be between 50 and 100", Some("threshold")))?,
        None => DEFAULT_THRESHOLD,
    };

    let response = match state.terminology.search_term(&term, threshold)? {
        WordSearchOutcome::Found(rows) => WordSearchResponse::Found {
            total_results: rows.len(),
            mappings: rows.into_iter().cloned().collect(),
            query: term,
            threshold,
        },
        WordSearchOutcome::NoMatches => WordSearchResponse::no_matches(term, threshold),
    };
    Ok(Json(response))
}

/// Blended fuzzy and semantic search
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    request.validate()?;
    let results = state.terminology.search(&request.query, request.options())?;
    Ok(Json(SearchResponse {
        query: request.query,
        total_results: results.len(),
        results,
    }))
}

pub async fn demo_health_passport(State(state): State<AppState>) -> Json<HealthPassport> {
    Json(state.terminology.demo_passport())
}
