//! Hybrid Assessment Domain
//!
//! A rule-based health assessment that pairs conventional care with
//! Ayurvedic, yoga and dietary guidance.
//!
//! # Flow
//!
//! 1. The request is reduced to [`RiskFeatures`] with clinical defaults for
//!    anything the patient did not supply
//! 2. Four calculators score hypertension, diabetes, cardiac and
//!    respiratory risk in `[0, 1]`
//! 3. Conditions at or above [`PREDICTION_THRESHOLD`] become predictions;
//!    with none, a general health assessment fallback is returned
//! 4. The primary concern drives the [`HybridPlan`]
//! 5. An optional [`TreatmentAdvisor`] adds a narrative. When it fails the
//!    assessment is returned from the rules alone

pub mod request;
pub mod features;
pub mod risk;
pub mod guidance;
pub mod plan;
pub mod assessment;
pub mod advisor;
pub mod service;
pub mod error;

pub use request::{
    AssessmentRequest, DietaryPreferences, LabResults, LifestyleFactors, PatientProfile, VitalSigns,
};
pub use features::RiskFeatures;
pub use risk::{Condition, RiskLevel, Urgency};
pub use plan::{HybridPlan, build_hybrid_plan};
pub use assessment::{
    assess_risk, ConditionPrediction, FallbackAssessment, OverallAssessment, RiskAssessment,
    PREDICTION_THRESHOLD,
};
pub use advisor::{AdvisorContext, TreatmentAdvisor};
pub use service::{AssessmentService, HybridAssessment, ASSESSMENT_DISCLAIMER};
pub use error::AssessmentError;
