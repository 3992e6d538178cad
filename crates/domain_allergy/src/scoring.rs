//! Candidate scoring

use serde::{Deserialize, Serialize};

use crate::herb::Herb;

/// Keywords that mark a direct functional match
pub const STRONG_KEYWORDS: [&str; 2] = ["antibacterial", "anti-inflammatory"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateConfidence {
    High,
    Medium,
    Low,
}

impl CandidateConfidence {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 5 => CandidateConfidence::High,
            s if s >= 3 => CandidateConfidence::Medium,
            _ => CandidateConfidence::Low,
        }
    }
}

/// Scores a herb for a keyword given the evidence links found for it.
///
/// +2 for a strong keyword, +1 for at least one link, +1 more for at
/// least two, +1 when the herb has a botanical name. Range 0..=5.
pub fn score_candidate(herb: &Herb, keyword: &str, evidence_links: &[String]) -> (u8, CandidateConfidence) {
    let mut score = 0;
    if STRONG_KEYWORDS.contains(&keyword) {
        score += 2;
    }
    if !evidence_links.is_empty() {
        score += 1;
    }
    if evidence_links.len() >= 2 {
        score += 1;
    }
    if herb.botanical_name().is_some() {
        score += 1;
    }
    (score, CandidateConfidence::from_score(score))
}
