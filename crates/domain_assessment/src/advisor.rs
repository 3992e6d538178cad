//! Treatment advisor port
//!
//! An advisor writes a free-text integrative treatment narrative. It is
//! optional; the rule engine never depends on it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, PortError};

/// What the advisor is told about the patient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorContext {
    pub primary_condition: String,
    pub risk_level: String,
    pub age: u32,
    pub gender: String,
    pub symptoms: Vec<String>,
    pub allergies: Vec<String>,
    pub diet_type: Option<String>,
}

impl AdvisorContext {
    /// Prompt text sent to a language model
    pub fn prompt(&self) -> String {
        let allergies = if self.allergies.is_empty() {
            "none reported".to_string()
        } else {
            self.allergies.join(", ")
        };
        format!(
            "Patient: {age}-year-old {gender}. Symptoms: {symptoms}. Allergies: {allergies}. Diet: {diet}.\n\
             Rule-based screening suggests {condition} ({risk} risk).\n\
             Write a short integrative care note combining modern medicine, Ayurveda, yoga and diet. \
             Do not prescribe doses. Advise consulting a clinician.",
            age = self.age,
            gender = self.gender,
            symptoms = self.symptoms.join(", "),
            diet = self.diet_type.as_deref().unwrap_or("not specified"),
            condition = self.primary_condition,
            risk = self.risk_level,
        )
    }
}

#[async_trait]
pub trait TreatmentAdvisor: DomainPort {
    async fn narrative(&self, context: &AdvisorContext) -> Result<String, PortError>;

    /// Name reported as the narrative's source
    fn name(&self) -> &str;
}
