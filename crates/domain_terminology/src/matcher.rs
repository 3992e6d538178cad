//! Fuzzy term matching over the mapping table

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use core_kernel::AyushCode;
use crate::mapping::{MappingRow, MappingTable};
use crate::similarity::{partial_ratio, partial_ratio_percent};

const FUZZY_WEIGHT: f64 = 0.6;
const SEMANTIC_WEIGHT: f64 = 0.4;

/// Confidence bucket for a blended score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchConfidence {
    #[serde(rename = "High Match")]
    High,
    #[serde(rename = "Medium Match")]
    Medium,
    #[serde(rename = "Low Match")]
    Low,
}

impl MatchConfidence {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MatchConfidence::High
        } else if score >= 0.6 {
            MatchConfidence::Medium
        } else {
            MatchConfidence::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchConfidence::High => "High Match",
            MatchConfidence::Medium => "Medium Match",
            MatchConfidence::Low => "Low Match",
        }
    }
}

/// Parameters of a blended search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub top_k: usize,
    pub min_similarity: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            top_k: 20,
            min_similarity: 0.5,
        }
    }
}

/// A mapping with the scores that ranked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMapping {
    pub ayush_code: AyushCode,
    pub ayush_term: String,
    pub who_code: String,
    pub who_term: String,
    /// Precomputed semantic similarity from the table
    pub similarity: f64,
    pub fuzzy_ayush: f64,
    pub fuzzy_who: f64,
    pub combined: f64,
    pub confidence: MatchConfidence,
    pub relationship: String,
}

#[derive(Debug, Clone, Default)]
pub struct TermMatcher {
    table: Arc<MappingTable>,
}

impl TermMatcher {
    pub fn new(table: Arc<MappingTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &MappingTable {
        &self.table
    }

    /// Blended search: `max(fuzzy_ayush, fuzzy_who) * 0.6 + similarity * 0.4`
    ///
    /// Rows below `min_similarity` are dropped; the rest are ranked by the
    /// blended score, highest first, and cut to `top_k`.
    pub fn search(&self, query: &str, options: SearchOptions) -> Vec<ScoredMapping> {
        let q = query.to_lowercase();

        let mut results: Vec<ScoredMapping> = self
            .table
            .indexed()
            .iter()
            .filter_map(|indexed| {
                let fuzzy_ayush = partial_ratio(&q, &indexed.ayush_lower);
                let fuzzy_who = partial_ratio(&q, &indexed.who_lower);
                let row = &indexed.row;
                let combined =
                    fuzzy_ayush.max(fuzzy_who) * FUZZY_WEIGHT + row.similarity * SEMANTIC_WEIGHT;

                (combined >= options.min_similarity).then(|| ScoredMapping {
                    ayush_code: row.ayush_code.clone(),
                    ayush_term: row.ayush_term.clone(),
                    who_code: row.who_code.clone(),
                    who_term: row.who_term.clone(),
                    similarity: row.similarity,
                    fuzzy_ayush,
                    fuzzy_who,
                    combined,
                    confidence: MatchConfidence::from_score(combined),
                    relationship: row.relationship.clone(),
                })
            })
            .collect();

        results.sort_by(|a, b| b.combined.total_cmp(&a.combined));
        results.truncate(options.top_k);
        results
    }

    /// Rows where any lower-cased word of `term` has a partial ratio of at
    /// least `threshold` percent against either term, in table order
    pub fn word_matches(&self, term: &str, threshold: u8) -> Vec<&MappingRow> {
        let lowered = term.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        let threshold = f64::from(threshold);

        self.table
            .indexed()
            .iter()
            .filter(|indexed| {
                words.iter().any(|word| {
                    partial_ratio_percent(word, &indexed.ayush_lower) >= threshold
                        || partial_ratio_percent(word, &indexed.who_lower) >= threshold
                })
            })
            .map(|indexed| &indexed.row)
            .collect()
    }

    /// [`word_matches`](Self::word_matches) ranked by precomputed similarity,
    /// highest first; ties keep table order
    pub fn word_search(&self, term: &str, threshold: u8) -> Vec<&MappingRow> {
        let mut matches = self.word_matches(term, threshold);
        matches.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, ayush: &str, who: &str, sim: f64) -> MappingRow {
        MappingRow {
            ayush_code: AyushCode::new(code),
            ayush_term: ayush.to_string(),
            target_system: "ICD-11".to_string(),
            who_code: "X".to_string(),
            who_term: who.to_string(),
            similarity: sim,
            relationship: "related".to_string(),
        }
    }

    fn matcher() -> TermMatcher {
        TermMatcher::new(Arc::new(MappingTable::from_rows(vec![
            row("A1", "Madhumeha", "Type 2 diabetes mellitus", 0.9),
            row("A2", "Prameha", "Diabetes mellitus, unspecified", 0.4),
            row("A3", "Amavata", "Rheumatoid arthritis", 0.3),
        ])))
    }

    #[test]
    fn test_confidence_buckets() {
        assert_eq!(MatchConfidence::from_score(0.8), MatchConfidence::High);
        assert_eq!(MatchConfidence::from_score(0.79), MatchConfidence::Medium);
        assert_eq!(MatchConfidence::from_score(0.6), MatchConfidence::Medium);
        assert_eq!(MatchConfidence::from_score(0.59), MatchConfidence::Low);
    }

    #[test]
    fn test_blended_ranks_by_combined() {
        let results = matcher().search("diabetes", SearchOptions::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].ayush_code.as_str(), "A1");
        assert!((results[0].combined - (0.6 + 0.9 * 0.4)).abs() < 1e-9);
        assert_eq!(results[0].confidence, MatchConfidence::High);
    }

    #[test]
    fn test_blended_respects_top_k() {
        let options = SearchOptions {
            top_k: 1,
            min_similarity: 0.0,
        };
        assert_eq!(matcher().search("diabetes", options).len(), 1);
    }

    #[test]
    fn test_word_search_orders_by_similarity() {
        let m = matcher();
        let results = m.word_search("Diabetes", 80);
        let codes: Vec<&str> = results.iter().map(|r| r.ayush_code.as_str()).collect();
        assert_eq!(codes, vec!["A1", "A2"]);
    }

    #[test]
    fn test_word_search_any_word_matches() {
        let m = matcher();
        let results = m.word_search("joint arthritis", 90);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ayush_code.as_str(), "A3");
    }
}
