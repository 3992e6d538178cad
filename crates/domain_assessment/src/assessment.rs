//! Risk assessment over all known conditions

use serde::{Deserialize, Serialize};

use crate::features::RiskFeatures;
use crate::guidance;
use crate::request::AssessmentRequest;
use crate::risk::{Condition, RiskLevel, Urgency};

/// Minimum risk for a condition to be reported
pub const PREDICTION_THRESHOLD: f64 = 0.3;

pub const RULE_ENGINE_SOURCE: &str = "rule_engine";
pub const FALLBACK_CONDITION: &str = "general_health_assessment_needed";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionPrediction {
    pub condition: Condition,
    pub combined_confidence: f64,
    pub risk_level: RiskLevel,
    pub urgency: Urgency,
    pub source: String,
    pub patient_considerations: Vec<String>,
    pub monitoring_recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub total_predictions: usize,
    pub highest_confidence: f64,
    pub primary_concern: Condition,
    /// Any of the top three predictions is urgent
    pub requires_immediate_attention: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackAssessment {
    pub condition: String,
    pub combined_confidence: f64,
    pub source: String,
    pub message: String,
    pub recommended_actions: Vec<String>,
    pub urgency: Urgency,
}

impl Default for FallbackAssessment {
    fn default() -> Self {
        Self {
            condition: FALLBACK_CONDITION.to_string(),
            combined_confidence: 0.5,
            source: "fallback".to_string(),
            message: "Unable to generate specific predictions. Recommend comprehensive health assessment."
                .to_string(),
            recommended_actions: vec![
                "Schedule appointment with healthcare provider".to_string(),
                "Complete comprehensive medical history".to_string(),
                "Consider basic diagnostic tests".to_string(),
            ],
            urgency: Urgency::Low,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallAssessment>,
    pub predictions: Vec<ConditionPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackAssessment>,
}

impl RiskAssessment {
    /// Top condition and its confidence
    pub fn primary(&self) -> Option<(Condition, f64)> {
        self.predictions
            .first()
            .map(|p| (p.condition, p.combined_confidence))
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }
}

/// Scores every condition and keeps those at or above the threshold,
/// highest first
pub fn assess_risk(request: &AssessmentRequest) -> RiskAssessment {
    let features = RiskFeatures::from_request(request);

    let mut predictions: Vec<ConditionPrediction> = Condition::ALL
        .iter()
        .map(|&condition| (condition, condition.risk(&features)))
        .filter(|&(_, risk)| risk >= PREDICTION_THRESHOLD)
        .map(|(condition, risk)| ConditionPrediction {
            condition,
            combined_confidence: risk,
            risk_level: RiskLevel::from_confidence(risk),
            urgency: Urgency::assess(condition, risk),
            source: RULE_ENGINE_SOURCE.to_string(),
            patient_considerations: guidance::patient_considerations(condition, &request.patient_data),
            monitoring_recommendations: guidance::monitoring_recommendations(condition, risk),
        })
        .collect();

    predictions.sort_by(|a, b| b.combined_confidence.total_cmp(&a.combined_confidence));

    let Some(top) = predictions.first() else {
        return RiskAssessment {
            overall: None,
            predictions,
            fallback: Some(FallbackAssessment::default()),
        };
    };

    let overall = OverallAssessment {
        total_predictions: predictions.len(),
        highest_confidence: top.combined_confidence,
        primary_concern: top.condition,
        requires_immediate_attention: predictions.iter().take(3).any(|p| p.urgency == Urgency::High),
    };

    RiskAssessment {
        overall: Some(overall),
        predictions,
        fallback: None,
    }
}
