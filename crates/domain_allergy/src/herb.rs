//! Herbs and scored herb candidates

use serde::{Deserialize, Serialize};

use core_kernel::HerbId;
use crate::scoring::CandidateConfidence;

pub const UNKNOWN_RISK_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerbRisk {
    pub label: String,
    pub notes: Vec<String>,
}

impl HerbRisk {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Risk for herbs without a recorded risk row
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_RISK_LABEL)
    }
}

impl Default for HerbRisk {
    fn default() -> Self {
        Self::unknown()
    }
}

/// An Ayurvedic herb as stored in the herb catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Herb {
    pub herb_id: HerbId,
    pub common: String,
    pub sanskrit: Option<String>,
    pub botanical: Option<String>,
    pub risk: HerbRisk,
    pub refs: Vec<String>,
}

impl Herb {
    pub fn new(herb_id: impl Into<HerbId>, common: impl Into<String>) -> Self {
        Self {
            herb_id: herb_id.into(),
            common: common.into(),
            sanskrit: None,
            botanical: None,
            risk: HerbRisk::unknown(),
            refs: Vec::new(),
        }
    }

    pub fn with_sanskrit(mut self, sanskrit: impl Into<String>) -> Self {
        self.sanskrit = Some(sanskrit.into());
        self
    }

    pub fn with_botanical(mut self, botanical: impl Into<String>) -> Self {
        self.botanical = Some(botanical.into());
        self
    }

    pub fn with_risk(mut self, risk: HerbRisk) -> Self {
        self.risk = risk;
        self
    }

    pub fn with_ref(mut self, reference: impl Into<String>) -> Self {
        self.refs.push(reference.into());
        self
    }

    /// Botanical name, when present and non-blank
    pub fn botanical_name(&self) -> Option<&str> {
        self.botanical.as_deref().filter(|b| !b.trim().is_empty())
    }

    /// Literature query used to find evidence for this herb
    pub fn evidence_query(&self, keyword: &str) -> String {
        format!("{} {}", self.botanical.as_deref().unwrap_or_default(), keyword)
    }
}

/// A herb suggested as an alternative, with its evidence and score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerbCandidate {
    #[serde(flatten)]
    pub herb: Herb,
    pub evidence_links: Vec<String>,
    pub why: Vec<String>,
    pub score: u8,
    pub confidence: CandidateConfidence,
    /// The indication keyword that produced this candidate
    pub keyword: String,
}

impl HerbCandidate {
    pub fn herb_id(&self) -> &HerbId {
        &self.herb.herb_id
    }
}
