//! Hybrid assessment service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::advisor::{AdvisorContext, TreatmentAdvisor};
use crate::assessment::{assess_risk, RiskAssessment, RULE_ENGINE_SOURCE};
use crate::error::AssessmentError;
use crate::plan::{build_hybrid_plan, HybridPlan};
use crate::request::AssessmentRequest;
use crate::risk::RiskLevel;

pub const ASSESSMENT_DISCLAIMER: &str =
    "This assessment is informational and does not replace a consultation with a qualified clinician.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridAssessment {
    pub patient_name: String,
    pub generated_at: DateTime<Utc>,
    pub risk_assessment: RiskAssessment,
    pub hybrid_recommendations: HybridPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_narrative: Option<String>,
    /// Engines that contributed to this assessment
    pub sources: Vec<String>,
    pub disclaimer: String,
}

#[derive(Clone, Default)]
pub struct AssessmentService {
    advisor: Option<Arc<dyn TreatmentAdvisor>>,
}

impl AssessmentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_advisor(mut self, advisor: Arc<dyn TreatmentAdvisor>) -> Self {
        self.advisor = Some(advisor);
        self
    }

    pub fn has_advisor(&self) -> bool {
        self.advisor.is_some()
    }

    #[instrument(skip(self, request), fields(age = request.patient_data.age, symptoms = request.symptoms.len()))]
    pub async fn assess(&self, request: &AssessmentRequest) -> Result<HybridAssessment, AssessmentError> {
        validate(request)?;

        let risk_assessment = assess_risk(request);
        let primary = risk_assessment.primary();
        let plan = build_hybrid_plan(request, primary);

        let mut sources = vec![RULE_ENGINE_SOURCE.to_string()];
        let ai_narrative = match &self.advisor {
            Some(advisor) => {
                let context = AdvisorContext {
                    primary_condition: plan.focus.clone(),
                    risk_level: RiskLevel::from_confidence(primary.map_or(0.5, |(_, c)| c))
                        .as_str()
                        .to_string(),
                    age: request.patient_data.age,
                    gender: request.patient_data.gender.clone(),
                    symptoms: request.symptoms.clone(),
                    allergies: request.dietary_preferences.allergy_list(),
                    diet_type: request.dietary_preferences.diet_type.clone(),
                };
                match advisor.narrative(&context).await {
                    Ok(text) => {
                        sources.push(advisor.name().to_string());
                        Some(text)
                    }
                    Err(e) => {
                        warn!(error = %e, "Treatment advisor failed, using rules only");
                        None
                    }
                }
            }
            None => None,
        };

        info!(
            focus = %plan.focus,
            predictions = risk_assessment.predictions.len(),
            narrative = ai_narrative.is_some(),
            "Hybrid assessment complete"
        );

        Ok(HybridAssessment {
            patient_name: request.patient_data.name.trim().to_string(),
            generated_at: Utc::now(),
            risk_assessment,
            hybrid_recommendations: plan,
            ai_narrative,
            sources,
            disclaimer: ASSESSMENT_DISCLAIMER.to_string(),
        })
    }
}

fn validate(request: &AssessmentRequest) -> Result<(), AssessmentError> {
    let patient = &request.patient_data;
    if patient.name.trim().is_empty() {
        return Err(AssessmentError::validation("patient_data.name", "must not be empty"));
    }
    if !(1..=120).contains(&patient.age) {
        return Err(AssessmentError::validation("patient_data.age", "must be between 1 and 120"));
    }
    if request.symptoms.iter().all(|s| s.trim().is_empty()) {
        return Err(AssessmentError::validation("symptoms", "at least one symptom is required"));
    }
    if let Some(stress) = request.lifestyle_factors.stress_level {
        if !(1..=10).contains(&stress) {
            return Err(AssessmentError::validation(
                "lifestyle_factors.stress_level",
                "must be between 1 and 10",
            ));
        }
    }
    if let Some(sleep) = request.lifestyle_factors.sleep_hours {
        if sleep > 24 {
            return Err(AssessmentError::validation(
                "lifestyle_factors.sleep_hours",
                "must be at most 24",
            ));
        }
    }
    Ok(())
}
