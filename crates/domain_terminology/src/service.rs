//! Terminology search service

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::HealthCheckResult;
use crate::error::TerminologyError;
use crate::mapping::{MappingRow, MappingTable};
use crate::matcher::{ScoredMapping, SearchOptions, TermMatcher};
use crate::passport::{demo_health_passport, HealthPassport};

pub const MIN_THRESHOLD: u8 = 50;
pub const MAX_THRESHOLD: u8 = 100;
pub const DEFAULT_THRESHOLD: u8 = 80;

/// Outcome of a word search
#[derive(Debug, Clone, PartialEq)]
pub enum WordSearchOutcome<'a> {
    Found(Vec<&'a MappingRow>),
    /// Nothing cleared the threshold
    NoMatches,
}

#[derive(Debug, Clone)]
pub struct TerminologyService {
    matcher: TermMatcher,
}

impl TerminologyService {
    pub fn new(table: Arc<MappingTable>) -> Self {
        Self {
            matcher: TermMatcher::new(table),
        }
    }

    pub fn mappings_loaded(&self) -> usize {
        self.matcher.table().len()
    }

    /// Word search with a percentage threshold in 50..=100
    #[instrument(skip(self))]
    pub fn search_term(&self, term: &str, threshold: u8) -> Result<WordSearchOutcome<'_>, TerminologyError> {
        if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
            return Err(TerminologyError::InvalidThreshold {
                value: threshold,
                min: MIN_THRESHOLD,
                max: MAX_THRESHOLD,
            });
        }
        self.ensure_loaded()?;

        let rows = self.matcher.word_search(term, threshold);
        debug!(matches = rows.len(), "Word search complete");
        if rows.is_empty() {
            Ok(WordSearchOutcome::NoMatches)
        } else {
            Ok(WordSearchOutcome::Found(rows))
        }
    }

    /// Blended fuzzy + semantic search
    #[instrument(skip(self))]
    pub fn search(&self, query: &str, options: SearchOptions) -> Result<Vec<ScoredMapping>, TerminologyError> {
        if query.trim().is_empty() {
            return Err(TerminologyError::InvalidQuery("query must not be empty".to_string()));
        }
        if !(0.0..=1.0).contains(&options.min_similarity) {
            return Err(TerminologyError::InvalidQuery(
                "min_similarity must be between 0 and 1".to_string(),
            ));
        }
        self.ensure_loaded()?;

        Ok(self.matcher.search(query, options))
    }

    /// The demo passport; works with an empty table, without enrichment
    pub fn demo_passport(&self) -> HealthPassport {
        demo_health_passport(&self.matcher)
    }

    pub fn health(&self) -> HealthCheckResult {
        if self.matcher.table().is_empty() {
            HealthCheckResult::unhealthy("terminology_mappings", 0, "Mapping database not available")
        } else {
            HealthCheckResult::healthy("terminology_mappings", 0)
        }
    }

    fn ensure_loaded(&self) -> Result<(), TerminologyError> {
        if self.matcher.table().is_empty() {
            return Err(TerminologyError::MappingUnavailable);
        }
        Ok(())
    }
}
