//! Cross-service workflow tests
//!
//! Drive the domain services the way the API wires them, on the in-memory
//! reference catalog, and check the HTTP layer reports the same outcomes.

use std::sync::Arc;

use axum_test::TestServer;
use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::Value;

use core_kernel::Money;
use domain_allergy::{AllergyMapperService, InMemoryHerbStore};
use domain_assessment::{AssessmentService, Condition};
use domain_claims::{Check, ClaimValidationService, DecisionStatus, InMemoryAuditLog, InMemoryCatalog, Outcome};
use domain_terminology::{MappingTable, TerminologyService};
use interface_api::{create_router, AppState};
use test_utils::*;

fn claims_service() -> (ClaimValidationService, Arc<InMemoryAuditLog>) {
    let audit = Arc::new(InMemoryAuditLog::new());
    let service = ClaimValidationService::new(Arc::new(InMemoryCatalog::reference())).with_audit(audit.clone());
    (service, audit)
}

fn server() -> TestServer {
    let (claims, _) = claims_service();
    let state = AppState::new(
        claims,
        TerminologyService::new(Arc::new(MappingTable::default())),
        AllergyMapperService::new(
            Arc::new(StaticDrugNormalizer::new()),
            Arc::new(StaticLiterature::default()),
            Arc::new(InMemoryHerbStore::reference()),
        ),
        AssessmentService::new(),
    );
    TestServer::new(create_router(state)).unwrap()
}

// ============================================================================
// Claim Workflow Tests
// ============================================================================

mod claim_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_premium_fracture_pays_after_copay() {
        let (service, audit) = claims_service();

        let decision = service.validate(&ClaimFixtures::premium_fracture()).await.unwrap();

        assert_status(&decision, DecisionStatus::Valid);
        assert_finding(&decision, Check::Sublimit, Outcome::NotApplicable);
        assert_finding(&decision, Check::Copay, Outcome::Applied);
        assert_approved(&decision, Money::inr(dec!(22500)));
        assert_eq!(audit.entries()[0].details["status"], "valid");
    }

    #[tokio::test]
    async fn test_basic_fracture_is_capped() {
        let (service, _) = claims_service();

        let decision = service
            .validate(&ClaimFixtures::basic_fracture_over_sublimit())
            .await
            .unwrap();

        assert_status(&decision, DecisionStatus::Partial);
        assert_finding(&decision, Check::Sublimit, Outcome::Applied);
        assert_money_approx_eq(
            decision.approved_amount.as_ref().unwrap(),
            &Money::inr(dec!(16000)),
            dec!(0),
        );
    }

    #[tokio::test]
    async fn test_exclusion_stops_before_financials() {
        let (service, _) = claims_service();

        let decision = service
            .validate(&ClaimFixtures::basic_diabetes_excluded())
            .await
            .unwrap();

        assert_status(&decision, DecisionStatus::Denied);
        assert_finding(&decision, Check::Coverage, Outcome::Fail);
        assert!(decision.approved_amount.is_none());
        assert!(decision.findings.iter().all(|f| f.check != Check::Copay));
    }

    #[tokio::test]
    async fn test_elective_admission_waits_for_preauth() {
        let (service, _) = claims_service();

        let decision = service
            .validate(&ClaimFixtures::standard_diabetes_elective())
            .await
            .unwrap();

        assert_status(&decision, DecisionStatus::NeedsPreauth);
        assert_finding(&decision, Check::Preauth, Outcome::Required);
        assert_eq!(
            decision.next_actions,
            vec!["Submit pre-authorization form", "Upload doctor's notes"]
        );
    }

    #[tokio::test]
    async fn test_short_enrollment_is_denied() {
        let (service, _) = claims_service();
        let request = ClaimRequestBuilder::new()
            .with_plan(CatalogFixtures::STANDARD_PLAN)
            .with_package(CatalogFixtures::DIABETES_PACKAGE, CatalogFixtures::DIABETES_ICD)
            .with_months_enrolled(0)
            .build();

        let decision = service.validate(&request).await.unwrap();

        assert_status(&decision, DecisionStatus::Denied);
        assert_finding(&decision, Check::Waiting, Outcome::Fail);
        assert_eq!(decision.next_actions, vec!["Complete 6 more month(s) of enrollment"]);
    }

    #[tokio::test]
    async fn test_mismatched_diagnosis_is_denied() {
        let (service, audit) = claims_service();
        let request = ClaimRequestBuilder::new()
            .with_diagnosis(CatalogFixtures::HYPERTENSION_ICD)
            .build();

        let decision = service.validate(&request).await.unwrap();

        assert_status(&decision, DecisionStatus::Denied);
        assert_eq!(decision.findings.len(), 1);
        assert_finding(&decision, Check::PkgIcdMatch, Outcome::Fail);
        assert_eq!(audit.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_package_writes_no_audit() {
        let (service, audit) = claims_service();

        let err = service.validate(&ClaimFixtures::unknown_package()).await.unwrap_err();

        assert!(err.to_string().contains("PKG999"));
        assert!(audit.entries().is_empty());
    }
}

// ============================================================================
// HTTP Parity Tests
// ============================================================================

mod http_parity_tests {
    use super::*;

    #[tokio::test]
    async fn test_builder_payload_matches_service_decision() {
        let builder = || {
            ClaimRequestBuilder::new()
                .with_member_id("MEM-0100")
                .with_plan(CatalogFixtures::BASIC_PLAN)
                .with_estimated_cost(dec!(30000))
        };
        let (service, _) = claims_service();
        let expected = service.validate(&builder().build()).await.unwrap();

        let body: Value = server()
            .post("/api/claims/validate_claim")
            .json(&builder().build_json())
            .await
            .json();

        assert_eq!(body["status"], serde_json::to_value(expected.status).unwrap());
        assert_eq!(body["claim_score"], expected.score);
        assert_eq!(body["findings"].as_array().unwrap().len(), expected.findings.len());
    }

    #[tokio::test]
    async fn test_negative_estimate_error_body() {
        let body: Value = server()
            .post("/api/claims/validate_claim")
            .json(&ClaimRequestBuilder::new().with_estimated_cost(dec!(-1)).build_json())
            .await
            .json();

        assert_error_body(&body, "validation_error", Some("estimated_cost_inr"));
    }

    #[tokio::test]
    async fn test_empty_mapping_table_error_body() {
        let body: Value = server().get("/api/ayush/search/Madhumeha").await.json();

        assert_error_body(&body, "service_unavailable", None);
    }
}

// ============================================================================
// Assessment Workflow Tests
// ============================================================================

mod assessment_workflow_tests {
    use super::*;

    #[tokio::test]
    async fn test_hypertensive_patient_plan() {
        let result = AssessmentService::new()
            .assess(&PatientFixtures::hypertensive())
            .await
            .unwrap();

        assert_eq!(result.risk_assessment.primary().unwrap().0, Condition::Hypertension);
        assert!(!result.risk_assessment.is_fallback());
    }

    #[tokio::test]
    async fn test_healthy_patient_falls_back() {
        let result = AssessmentService::new()
            .assess(&PatientFixtures::healthy())
            .await
            .unwrap();

        assert!(result.risk_assessment.is_fallback());
        assert_eq!(result.hybrid_recommendations.focus, "general_wellness");
    }

    #[tokio::test]
    async fn test_advisor_sees_allergies() {
        let advisor = Arc::new(CannedAdvisor::new());
        let service = AssessmentService::new().with_advisor(advisor.clone());
        let request = AssessmentRequestBuilder::new()
            .with_age(58)
            .with_body(165.0, 90.0)
            .with_glucose(240.0)
            .with_allergies(&["Garlic"])
            .build();

        let result = service.assess(&request).await.unwrap();

        assert_eq!(result.hybrid_recommendations.focus, "diabetes");
        let prompt = advisor.prompt_for("diabetes").unwrap();
        assert!(prompt.contains("Garlic"));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn seeded_claims_always_decide(request in claim_request_strategy()) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let (service, _) = claims_service();

            let decision = runtime.block_on(service.validate(&request)).unwrap();

            prop_assert!((0.0..=100.0).contains(&decision.score));
            prop_assert_eq!(decision.approved_amount.is_some(), decision.status.is_approved());
        }

        #[test]
        fn assessments_accept_generated_symptoms(symptoms in symptoms_strategy(), age in 1u32..=120) {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let request = AssessmentRequestBuilder::new()
                .with_age(age)
                .with_symptoms(&symptoms)
                .build();

            let result = runtime.block_on(AssessmentService::new().assess(&request)).unwrap();

            prop_assert!(result.risk_assessment.primary().is_some() || result.risk_assessment.is_fallback());
        }
    }
}
