//! Test Data Builders
//!
//! Builders for request payloads with sensible defaults. Tests set only the
//! fields they care about; everything else comes from the fixtures.

use fake::faker::name::en::Name;
use fake::Fake;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use core_kernel::Money;
use domain_assessment::{AssessmentRequest, LabResults, LifestyleFactors, PatientProfile, VitalSigns};
use domain_claims::ClaimRequest;

use crate::fixtures::CatalogFixtures;

/// Builder for claim requests against the reference catalog
#[derive(Debug, Clone)]
pub struct ClaimRequestBuilder {
    member_id: String,
    plan_name: String,
    diagnosis_code: String,
    package_id: String,
    admission_type: String,
    length_days: Option<u32>,
    estimated_cost: Option<Decimal>,
    months_enrolled: Option<u32>,
}

impl Default for ClaimRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimRequestBuilder {
    /// Premium plan fracture claim with a random member id
    pub fn new() -> Self {
        Self {
            member_id: format!("MEM-{:04}", (1..10_000u32).fake::<u32>()),
            plan_name: CatalogFixtures::PREMIUM_PLAN.to_string(),
            diagnosis_code: CatalogFixtures::FRACTURE_ICD.to_string(),
            package_id: CatalogFixtures::FRACTURE_PACKAGE.to_string(),
            admission_type: "emergency".to_string(),
            length_days: None,
            estimated_cost: None,
            months_enrolled: None,
        }
    }

    pub fn with_member_id(mut self, member_id: impl Into<String>) -> Self {
        self.member_id = member_id.into();
        self
    }

    pub fn with_plan(mut self, plan_name: impl Into<String>) -> Self {
        self.plan_name = plan_name.into();
        self
    }

    /// Sets both the diagnosis code and the package
    pub fn with_package(mut self, package_id: impl Into<String>, diagnosis_code: impl Into<String>) -> Self {
        self.package_id = package_id.into();
        self.diagnosis_code = diagnosis_code.into();
        self
    }

    pub fn with_diagnosis(mut self, diagnosis_code: impl Into<String>) -> Self {
        self.diagnosis_code = diagnosis_code.into();
        self
    }

    pub fn elective(mut self) -> Self {
        self.admission_type = "elective".to_string();
        self
    }

    pub fn with_length_days(mut self, days: u32) -> Self {
        self.length_days = Some(days);
        self
    }

    pub fn with_estimated_cost(mut self, amount: Decimal) -> Self {
        self.estimated_cost = Some(amount);
        self
    }

    pub fn with_months_enrolled(mut self, months: u32) -> Self {
        self.months_enrolled = Some(months);
        self
    }

    pub fn build(self) -> ClaimRequest {
        let mut request = ClaimRequest::new(
            self.member_id,
            self.plan_name,
            self.diagnosis_code,
            self.package_id,
            self.admission_type,
        );
        if let Some(days) = self.length_days {
            request = request.with_length_days(days);
        }
        if let Some(amount) = self.estimated_cost {
            request = request.with_estimated_cost(Money::inr(amount));
        }
        if let Some(months) = self.months_enrolled {
            request = request.with_months_enrolled(months);
        }
        request
    }

    /// The request as the HTTP API receives it, using the wire field names
    pub fn build_json(self) -> Value {
        let mut body = json!({
            "member_id": self.member_id,
            "plan_name": self.plan_name,
            "icd_code": self.diagnosis_code,
            "package_id": self.package_id,
            "admission_type": self.admission_type,
        });
        if let Some(days) = self.length_days {
            body["length_days"] = json!(days);
        }
        if let Some(amount) = self.estimated_cost {
            body["estimated_cost_inr"] = json!(amount);
        }
        if let Some(months) = self.months_enrolled {
            body["months_enrolled"] = json!(months);
        }
        body
    }
}

/// Builder for hybrid assessment requests
#[derive(Debug, Clone)]
pub struct AssessmentRequestBuilder {
    patient: PatientProfile,
    symptoms: Vec<String>,
    allergies: Vec<String>,
    vitals: Option<VitalSigns>,
    labs: Option<LabResults>,
    lifestyle: LifestyleFactors,
}

impl Default for AssessmentRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentRequestBuilder {
    /// Adult patient with a random name and a single mild symptom
    pub fn new() -> Self {
        let name: String = Name().fake();
        Self {
            patient: PatientProfile::new(name, 40, "Female"),
            symptoms: vec!["Fatigue".to_string()],
            allergies: Vec::new(),
            vitals: None,
            labs: None,
            lifestyle: LifestyleFactors::default(),
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.patient.age = age;
        self
    }

    pub fn with_body(mut self, height_cm: f64, weight_kg: f64) -> Self {
        self.patient = self.patient.with_body(height_cm, weight_kg);
        self
    }

    pub fn smoker(mut self) -> Self {
        self.patient = self.patient.smoker();
        self
    }

    pub fn with_symptoms(mut self, symptoms: &[&str]) -> Self {
        self.symptoms = symptoms.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_allergies(mut self, allergies: &[&str]) -> Self {
        self.allergies = allergies.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_vitals(mut self, vitals: VitalSigns) -> Self {
        self.vitals = Some(vitals);
        self
    }

    pub fn with_glucose(mut self, glucose: f64) -> Self {
        self.labs = Some(LabResults {
            glucose,
            ..LabResults::default()
        });
        self
    }

    pub fn build(self) -> AssessmentRequest {
        let symptoms: Vec<&str> = self.symptoms.iter().map(String::as_str).collect();
        let allergies: Vec<&str> = self.allergies.iter().map(String::as_str).collect();

        let mut request = AssessmentRequest::new(self.patient, &symptoms)
            .with_allergies(&allergies)
            .with_lifestyle(self.lifestyle);
        if let Some(vitals) = self.vitals {
            request = request.with_vitals(vitals);
        }
        if let Some(labs) = self.labs {
            request = request.with_labs(labs);
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_builder_defaults_to_premium_fracture() {
        let request = ClaimRequestBuilder::new().build();
        assert_eq!(request.plan_name, "PLAN_PREMIUM");
        assert_eq!(request.package_id.as_str(), "PKG001");
        assert!(request.member_id.as_str().starts_with("MEM-"));
        assert!(request.estimated_cost.is_none());
    }

    #[test]
    fn test_claim_builder_json_uses_wire_names() {
        let body = ClaimRequestBuilder::new()
            .with_estimated_cost(Decimal::new(30000, 0))
            .with_length_days(4)
            .build_json();
        assert_eq!(body["icd_code"], "S52.5");
        assert_eq!(body["length_days"], 4);
        assert!(body.get("estimated_cost_inr").is_some());
        assert!(body.get("months_enrolled").is_none());
    }

    #[test]
    fn test_assessment_builder_sets_labs() {
        let request = AssessmentRequestBuilder::new().with_glucose(180.0).build();
        assert_eq!(request.lab_results.map(|l| l.glucose), Some(180.0));
        assert!(!request.patient_data.name.is_empty());
    }
}
