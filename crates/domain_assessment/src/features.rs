//! Risk features extracted from an assessment request

use crate::request::{AssessmentRequest, LabResults, VitalSigns};

/// BMI assumed when height or weight is missing
pub const DEFAULT_BMI: f64 = 25.0;

/// Activity and stress on a three-step scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Low = 0,
    Medium = 1,
    High = 2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SymptomFlags {
    pub chest_pain: bool,
    pub shortness_of_breath: bool,
    pub fatigue: bool,
    pub dizziness: bool,
    pub nausea: bool,
    pub fever: bool,
    pub headache: bool,
}

impl SymptomFlags {
    /// Symptoms are lower-cased with spaces turned into underscores, then
    /// matched by substring
    pub fn from_symptoms(symptoms: &[String]) -> Self {
        let normalized: Vec<String> = symptoms
            .iter()
            .map(|s| s.trim().to_lowercase().replace(' ', "_"))
            .collect();
        let any = |keys: &[&str]| normalized.iter().any(|s| keys.iter().any(|k| s.contains(k)));

        Self {
            chest_pain: any(&["chest_pain", "chest_tightness"]),
            shortness_of_breath: any(&["shortness_of_breath", "breathing"]),
            fatigue: any(&["fatigue"]),
            dizziness: any(&["dizziness"]),
            nausea: any(&["nausea"]),
            fever: any(&["fever"]),
            headache: any(&["headache"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RiskFeatures {
    pub age: u32,
    pub bmi: f64,
    pub vitals: VitalSigns,
    pub labs: LabResults,
    pub symptoms: SymptomFlags,
    pub smoking: bool,
    pub exercise: Level,
    pub stress: Level,
}

impl RiskFeatures {
    pub fn from_request(request: &AssessmentRequest) -> Self {
        let lifestyle = &request.lifestyle_factors;
        Self {
            age: request.patient_data.age,
            bmi: request.patient_data.bmi().unwrap_or(DEFAULT_BMI),
            vitals: request.vital_signs.unwrap_or_default(),
            labs: request.lab_results.unwrap_or_default(),
            symptoms: SymptomFlags::from_symptoms(&request.symptoms),
            smoking: request.patient_data.smoking,
            exercise: exercise_level(lifestyle.exercise_frequency.as_deref()),
            stress: stress_level(lifestyle.stress_level),
        }
    }
}

fn exercise_level(frequency: Option<&str>) -> Level {
    match frequency.map(str::trim) {
        Some(f) if f.eq_ignore_ascii_case("never") => Level::Low,
        Some(f) if f.starts_with("3-4") || f.starts_with("5+") => Level::High,
        _ => Level::Medium,
    }
}

fn stress_level(score: Option<u8>) -> Level {
    match score {
        Some(s) if s >= 8 => Level::High,
        Some(s) if s <= 3 => Level::Low,
        _ => Level::Medium,
    }
}
