//! Demo health passport
//!
//! A fixed sample patient whose conditions are enriched with mappings from
//! the terminology table. No real patient data is involved.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::AyushCode;
use crate::mapping::MappingRow;
use crate::matcher::TermMatcher;

/// Word-search threshold used when enriching passport conditions
pub const PASSPORT_MATCH_THRESHOLD: u8 = 70;
/// Mappings attached to each condition, at most
pub const PASSPORT_MAPPINGS_PER_CONDITION: usize = 3;

pub const DEMO_ABHA_ID: &str = "12-3456-7890-1234";
pub const DEMO_PATIENT_NAME: &str = "Demo Patient";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionMapping {
    pub ayush_code: AyushCode,
    pub ayush_term: String,
    pub who_code: String,
    pub who_term: String,
    pub similarity: f64,
}

impl From<&MappingRow> for ConditionMapping {
    fn from(row: &MappingRow) -> Self {
        Self {
            ayush_code: row.ayush_code.clone(),
            ayush_term: row.ayush_term.clone(),
            who_code: row.who_code.clone(),
            who_term: row.who_term.clone(),
            similarity: row.similarity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportCondition {
    pub condition: String,
    pub ayush_term: String,
    pub ayush_code: AyushCode,
    pub who_code: String,
    pub system: String,
    pub severity: String,
    pub diagnosed_date: String,
    pub semantic_mappings: Vec<ConditionMapping>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportMedication {
    pub medicine: String,
    pub dosage: String,
    pub system: String,
    pub prescribed_date: String,
    pub prescribed_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_group: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub last_recorded: String,
    pub blood_pressure: String,
    pub heart_rate: String,
    pub weight: String,
    pub height: String,
    pub bmi: f64,
    pub temperature: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthPassport {
    pub abha_id: String,
    pub generated_at: DateTime<Utc>,
    pub patient_demographics: Demographics,
    pub medical_history: Vec<PassportCondition>,
    pub current_medications: Vec<PassportMedication>,
    pub vital_signs: VitalSigns,
    pub allergies: Vec<String>,
    /// Whether the mapping table was available for enrichment
    pub mapping_database_loaded: bool,
}

fn condition(
    name: &str,
    ayush_term: &str,
    ayush_code: &str,
    who_code: &str,
    severity: &str,
    diagnosed_date: &str,
) -> PassportCondition {
    PassportCondition {
        condition: name.to_string(),
        ayush_term: ayush_term.to_string(),
        ayush_code: AyushCode::new(ayush_code),
        who_code: who_code.to_string(),
        system: "Ayurveda".to_string(),
        severity: severity.to_string(),
        diagnosed_date: diagnosed_date.to_string(),
        semantic_mappings: Vec::new(),
    }
}

fn medication(medicine: &str, dosage: &str, prescribed_date: &str) -> PassportMedication {
    PassportMedication {
        medicine: medicine.to_string(),
        dosage: dosage.to_string(),
        system: "Ayurveda".to_string(),
        prescribed_date: prescribed_date.to_string(),
        prescribed_by: "Dr. Ayurvedic Practitioner".to_string(),
    }
}

/// Builds the demo passport, enriching each condition from `matcher`
pub fn demo_health_passport(matcher: &TermMatcher) -> HealthPassport {
    let loaded = !matcher.table().is_empty();

    let medical_history = [
        condition("Hypertension", "Rakta Gata Vata", "AY-CVS-001", "I10", "Mild", "2024-01-15"),
        condition("Type 2 Diabetes", "Madhumeha", "AY-END-002", "E11.9", "Moderate", "2023-08-20"),
        condition("Arthritis", "Amavata", "AY-MSK-003", "M79.3", "Mild", "2024-03-10"),
    ]
    .into_iter()
    .map(|mut c| {
        if loaded {
            c.semantic_mappings = enrich(matcher, &c.condition);
        }
        c
    })
    .collect();

    HealthPassport {
        abha_id: DEMO_ABHA_ID.to_string(),
        generated_at: Utc::now(),
        patient_demographics: Demographics {
            name: DEMO_PATIENT_NAME.to_string(),
            age: 45,
            gender: "Male".to_string(),
            blood_group: "O+".to_string(),
            city: "Pune".to_string(),
            state: "Maharashtra".to_string(),
            country: "India".to_string(),
        },
        medical_history,
        current_medications: vec![
            medication("Ashwagandha Churna", "5g twice daily", "2024-01-15"),
            medication("Jamun Seed Powder", "2g daily with water", "2023-08-20"),
        ],
        vital_signs: VitalSigns {
            last_recorded: "2024-09-15".to_string(),
            blood_pressure: "130/85 mmHg".to_string(),
            heart_rate: "72 bpm".to_string(),
            weight: "75 kg".to_string(),
            height: "175 cm".to_string(),
            bmi: 24.5,
            temperature: "98.6°F".to_string(),
        },
        allergies: vec!["Peanuts".to_string(), "Shellfish".to_string()],
        mapping_database_loaded: loaded,
    }
}

fn enrich(matcher: &TermMatcher, condition: &str) -> Vec<ConditionMapping> {
    matcher
        .word_matches(condition, PASSPORT_MATCH_THRESHOLD)
        .into_iter()
        .take(PASSPORT_MAPPINGS_PER_CONDITION)
        .map(ConditionMapping::from)
        .collect()
}
