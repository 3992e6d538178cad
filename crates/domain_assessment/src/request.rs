//! Assessment request types
//!
//! Field names follow the payload the assessment form posts. Everything
//! beyond name, age and symptoms is optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    pub name: String,
    pub age: u32,
    #[serde(default)]
    pub gender: String,
    #[serde(default, alias = "height")]
    pub height_cm: Option<f64>,
    #[serde(default, alias = "weight")]
    pub weight_kg: Option<f64>,
    #[serde(default)]
    pub activity_level: Option<String>,
    #[serde(default)]
    pub smoking: bool,
    #[serde(default)]
    pub medical_history: Vec<String>,
}

impl PatientProfile {
    pub fn new(name: impl Into<String>, age: u32, gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender: gender.into(),
            height_cm: None,
            weight_kg: None,
            activity_level: None,
            smoking: false,
            medical_history: Vec::new(),
        }
    }

    pub fn with_body(mut self, height_cm: f64, weight_kg: f64) -> Self {
        self.height_cm = Some(height_cm);
        self.weight_kg = Some(weight_kg);
        self
    }

    pub fn smoker(mut self) -> Self {
        self.smoking = true;
        self
    }

    pub fn with_history(mut self, condition: impl Into<String>) -> Self {
        self.medical_history.push(condition.into());
        self
    }

    /// Body mass index, when height and weight are both known
    pub fn bmi(&self) -> Option<f64> {
        match (self.height_cm, self.weight_kg) {
            (Some(h), Some(w)) if h > 0.0 => {
                let metres = h / 100.0;
                Some(w / (metres * metres))
            }
            _ => None,
        }
    }

    pub fn is_female(&self) -> bool {
        self.gender.eq_ignore_ascii_case("female")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietaryPreferences {
    #[serde(default)]
    pub diet_type: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
}

impl DietaryPreferences {
    /// Allergies with blanks removed and whitespace trimmed
    pub fn allergy_list(&self) -> Vec<String> {
        self.allergies
            .iter()
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LifestyleFactors {
    /// "Never", "1-2 times/week", "3-4 times/week" or "5+ times/week"
    #[serde(default)]
    pub exercise_frequency: Option<String>,
    #[serde(default)]
    pub sleep_hours: Option<u8>,
    /// Self-reported, 1 to 10
    #[serde(default)]
    pub stress_level: Option<u8>,
    #[serde(default)]
    pub yoga_experience: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VitalSigns {
    pub systolic_bp: f64,
    pub diastolic_bp: f64,
    pub heart_rate: f64,
    /// Degrees Fahrenheit
    pub temperature: f64,
    pub respiratory_rate: f64,
}

impl Default for VitalSigns {
    fn default() -> Self {
        Self {
            systolic_bp: 120.0,
            diastolic_bp: 80.0,
            heart_rate: 72.0,
            temperature: 98.6,
            respiratory_rate: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabResults {
    /// Fasting glucose, mg/dL
    pub glucose: f64,
    /// Total cholesterol, mg/dL
    pub cholesterol: f64,
}

impl Default for LabResults {
    fn default() -> Self {
        Self {
            glucose: 100.0,
            cholesterol: 200.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub patient_data: PatientProfile,
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: DietaryPreferences,
    #[serde(default)]
    pub lifestyle_factors: LifestyleFactors,
    #[serde(default)]
    pub vital_signs: Option<VitalSigns>,
    #[serde(default)]
    pub lab_results: Option<LabResults>,
}

impl AssessmentRequest {
    pub fn new(patient_data: PatientProfile, symptoms: &[&str]) -> Self {
        Self {
            patient_data,
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            dietary_preferences: DietaryPreferences::default(),
            lifestyle_factors: LifestyleFactors::default(),
            vital_signs: None,
            lab_results: None,
        }
    }

    pub fn with_vitals(mut self, vitals: VitalSigns) -> Self {
        self.vital_signs = Some(vitals);
        self
    }

    pub fn with_labs(mut self, labs: LabResults) -> Self {
        self.lab_results = Some(labs);
        self
    }

    pub fn with_lifestyle(mut self, lifestyle: LifestyleFactors) -> Self {
        self.lifestyle_factors = lifestyle;
        self
    }

    pub fn with_allergies(mut self, allergies: &[&str]) -> Self {
        self.dietary_preferences.allergies = allergies.iter().map(|a| a.to_string()).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_from_height_and_weight() {
        let p = PatientProfile::new("Asha", 40, "Female").with_body(170.0, 70.0);
        let bmi = p.bmi().unwrap();
        assert!((bmi - 24.22).abs() < 0.01);
    }

    #[test]
    fn test_bmi_unknown_without_height() {
        let p = PatientProfile::new("Asha", 40, "Female");
        assert!(p.bmi().is_none());
    }

    #[test]
    fn test_allergy_list_drops_blanks() {
        let prefs = DietaryPreferences {
            allergies: vec![" nuts".to_string(), "".to_string(), "dairy ".to_string()],
            ..Default::default()
        };
        assert_eq!(prefs.allergy_list(), vec!["nuts", "dairy"]);
    }
}
