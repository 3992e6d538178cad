//! Terminology search DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_terminology::{MappingRow, ScoredMapping, SearchOptions};

#[derive(Debug, Deserialize)]
pub struct ThresholdQuery {
    pub threshold: Option<u32>,
}

/// Word search result; the table's CSV column names are kept on the rows
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum WordSearchResponse {
    Found {
        query: String,
        threshold: u8,
        total_results: usize,
        mappings: Vec<MappingRow>,
    },
    NoMatches {
        query: String,
        threshold: u8,
        message: String,
        suggestion: String,
    },
}

impl WordSearchResponse {
    pub fn no_matches(query: String, threshold: u8) -> Self {
        WordSearchResponse::NoMatches {
            message: format!("No matches found for '{}' with threshold {}%", query, threshold),
            suggestion: "Try lowering the threshold or using different search terms".to_string(),
            query,
            threshold,
        }
    }
}

fn default_top_k() -> usize {
    SearchOptions::default().top_k
}

fn default_min_similarity() -> f64 {
    SearchOptions::default().min_similarity
}

#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 200, message = "query must be 1 to 200 characters"))]
    pub query: String,
    #[serde(default = "default_top_k")]
    #[validate(range(min = 1, max = 100, message = "top_k must be between 1 and 100"))]
    pub top_k: usize,
    #[serde(default = "default_min_similarity")]
    #[validate(range(min = 0.0, max = 1.0, message = "min_similarity must be between 0 and 1"))]
    pub min_similarity: f64,
}

impl SearchRequest {
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            top_k: self.top_k,
            min_similarity: self.min_similarity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub total_results: usize,
    pub results: Vec<ScoredMapping>,
}

#[derive(Debug, Serialize)]
pub struct TerminologyHealthResponse {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub semantic_search: &'static str,
    pub database: &'static str,
    pub total_mappings: usize,
}
