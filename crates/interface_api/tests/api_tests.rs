//! HTTP tests for the gateway and the four mounted services
//!
//! The router runs in-process on the in-memory reference catalog, the bundled
//! mapping CSV and the fakes from `test_utils`, so no network or database is
//! needed.

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use domain_allergy::{AllergyMapperService, InMemoryHerbStore};
use domain_assessment::AssessmentService;
use domain_claims::{ClaimValidationService, InMemoryAuditLog, InMemoryCatalog};
use domain_terminology::{MappingTable, TerminologyService};
use interface_api::{create_router, AppState};
use test_utils::{
    assert_error_body, CannedAdvisor, CatalogFixtures, DrugFixtures, PatientFixtures, StaticDrugNormalizer,
    StaticLiterature,
};

const MAPPINGS_CSV: &str = include_str!("../../../data/ayush_who_mappings.csv");

struct Harness {
    server: TestServer,
    audit: Arc<InMemoryAuditLog>,
}

struct HarnessBuilder {
    mappings: MappingTable,
    normalizer: StaticDrugNormalizer,
    advisor: Option<CannedAdvisor>,
}

impl HarnessBuilder {
    fn new() -> Self {
        Self {
            mappings: MappingTable::from_reader(MAPPINGS_CSV.as_bytes()).unwrap(),
            normalizer: StaticDrugNormalizer::new(),
            advisor: None,
        }
    }

    fn without_mappings(mut self) -> Self {
        self.mappings = MappingTable::default();
        self
    }

    fn normalizer(mut self, normalizer: StaticDrugNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    fn advisor(mut self, advisor: CannedAdvisor) -> Self {
        self.advisor = Some(advisor);
        self
    }

    fn build(self) -> Harness {
        let audit = Arc::new(InMemoryAuditLog::new());
        let claims = ClaimValidationService::new(Arc::new(InMemoryCatalog::reference())).with_audit(audit.clone());
        let allergy = AllergyMapperService::new(
            Arc::new(self.normalizer),
            Arc::new(StaticLiterature::with_links(2)),
            Arc::new(InMemoryHerbStore::reference()),
        );
        let mut assessment = AssessmentService::new();
        if let Some(advisor) = self.advisor {
            assessment = assessment.with_advisor(Arc::new(advisor));
        }

        let state = AppState::new(
            claims,
            TerminologyService::new(Arc::new(self.mappings)),
            allergy,
            assessment,
        );
        Harness {
            server: TestServer::new(create_router(state)).unwrap(),
            audit,
        }
    }
}

fn harness() -> Harness {
    HarnessBuilder::new().build()
}

fn claim(plan: &str, package: &str, icd: &str, admission: &str) -> Value {
    json!({
        "member_id": "MEM-0001",
        "plan_name": plan,
        "icd_code": icd,
        "package_id": package,
        "admission_type": admission,
    })
}

fn patient(name: &str, age: u32, symptoms: &[&str]) -> Value {
    json!({
        "patient_data": {
            "name": name,
            "age": age,
            "gender": "Female",
            "height": 160.0,
            "weight": 82.0
        },
        "symptoms": symptoms,
        "lab_results": { "glucose": 210.0, "cholesterol": 190.0 }
    })
}

// ============================================================================
// Claims Tests
// ============================================================================

mod claims_tests {
    use super::*;

    #[tokio::test]
    async fn test_premium_fracture_is_valid() {
        let h = harness();
        let mut body = claim("Premium Plan", CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD, "emergency");
        body["estimated_cost_inr"] = json!(25000);

        let response = h.server.post("/api/claims/validate_claim").json(&body).await;

        response.assert_status_ok();
        let decision: Value = response.json();
        assert_eq!(decision["status"], "valid");
        assert_eq!(decision["claim_status"], "✅ Valid");
        assert_eq!(decision["approved_amount_inr"], json!(22500.0));
        assert_eq!(decision["claim_score"], json!(95.0));
    }

    #[tokio::test]
    async fn test_basic_fracture_capped_by_sublimit() {
        let h = harness();
        let mut body = claim(CatalogFixtures::BASIC_PLAN, CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD, "emergency");
        body["estimated_cost_inr"] = json!("30000");

        let decision: Value = h.server.post("/api/claims/validate_claim").json(&body).await.json();

        assert_eq!(decision["status"], "partial");
        assert_eq!(decision["approved_amount_inr"], json!(16000.0));
        assert_eq!(decision["claim_score"], json!(85.0));
    }

    #[tokio::test]
    async fn test_excluded_package_is_denied() {
        let h = harness();
        let body = claim("Basic Plan", CatalogFixtures::DIABETES_PACKAGE, CatalogFixtures::DIABETES_ICD, "elective");

        let response = h.server.post("/api/claims/validate_claim").json(&body).await;

        response.assert_status_ok();
        let decision: Value = response.json();
        assert_eq!(decision["status"], "denied");
        assert!(decision["approved_amount_inr"].is_null());
        assert!(decision["findings"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f["result"] == "FAIL"));
    }

    #[tokio::test]
    async fn test_elective_admission_needs_preauth() {
        let h = harness();
        let body = claim("Standard Plan", CatalogFixtures::DIABETES_PACKAGE, CatalogFixtures::DIABETES_ICD, "elective");

        let decision: Value = h.server.post("/api/claims/validate_claim").json(&body).await.json();

        assert_eq!(decision["status"], "needs_preauth");
        assert!(!decision["next_actions"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_diagnosis_code_alias_accepted() {
        let h = harness();
        let body = json!({
            "member_id": "MEM-0001",
            "plan_name": "Premium Plan",
            "diagnosis_code": CatalogFixtures::FRACTURE_ICD,
            "package_id": CatalogFixtures::FRACTURE_PACKAGE,
            "admission_type": "emergency"
        });

        h.server.post("/api/claims/validate_claim").json(&body).await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_unknown_package_returns_hint() {
        let h = harness();
        let body = claim("Premium Plan", "PKG999", CatalogFixtures::FRACTURE_ICD, "emergency");

        let response = h.server.post("/api/claims/validate_claim").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let error: Value = response.json();
        assert_eq!(error["error"], "not_found");
        assert_eq!(error["details"]["package_id"], "PKG999");
        assert!(error["details"]["hint"].as_str().unwrap().contains("/meta/packages"));
    }

    #[tokio::test]
    async fn test_unknown_plan_lists_alternatives() {
        let h = harness();
        let body = claim("Gold Plan", CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD, "emergency");

        let response = h.server.post("/api/claims/validate_claim").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let error: Value = response.json();
        assert_eq!(error["details"]["input"], "Gold Plan");
        assert_eq!(error["details"]["try_one_of"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_blank_member_rejected() {
        let h = harness();
        let mut body = claim("Premium Plan", CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD, "emergency");
        body["member_id"] = json!("");

        let response = h.server.post("/api/claims/validate_claim").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["field"], "member_id");
    }

    #[tokio::test]
    async fn test_validation_is_audited() {
        let h = harness();
        let body = claim("Premium Plan", CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD, "emergency");

        h.server.post("/api/claims/validate_claim").json(&body).await.assert_status_ok();

        let entries = h.audit.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "validate_claim");
    }

    #[tokio::test]
    async fn test_list_plans() {
        let h = harness();

        let plans: Value = h.server.get("/api/claims/meta/plans").await.json();

        let ids: Vec<&str> = plans
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["plan_id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, CatalogFixtures::plan_ids());
    }

    #[tokio::test]
    async fn test_list_packages_filtered_by_icd() {
        let h = harness();

        let packages: Value = h
            .server
            .get("/api/claims/meta/packages")
            .add_query_param("icd_code", CatalogFixtures::DIABETES_ICD)
            .await
            .json();

        let packages = packages.as_array().unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0]["package_id"], CatalogFixtures::DIABETES_PACKAGE);
        assert_eq!(packages[0]["tariff"], json!(15000.0));
    }

    #[tokio::test]
    async fn test_list_packages_respects_limit() {
        let h = harness();

        let packages: Value = h
            .server
            .get("/api/claims/meta/packages")
            .add_query_param("limit", 2)
            .await
            .json();

        assert_eq!(packages.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_claims_health() {
        let h = harness();
        let health: Value = h.server.get("/api/claims/health").await.json();
        assert_eq!(health, json!({ "ok": true }));
    }
}

// ============================================================================
// Terminology Tests
// ============================================================================

mod ayush_tests {
    use super::*;

    #[tokio::test]
    async fn test_word_search_finds_ayush_term() {
        let h = harness();

        let response = h.server.get("/api/ayush/search/Madhumeha").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["threshold"], 80);
        let mappings = body["mappings"].as_array().unwrap();
        assert!(mappings.iter().any(|m| m["WHO_Code_Candidate"] == "5A11"));
        assert_eq!(body["total_results"], json!(mappings.len()));
    }

    #[tokio::test]
    async fn test_word_search_without_matches() {
        let h = harness();

        let body: Value = h.server.get("/api/ayush/search/qqxxzz").await.json();

        assert!(body["mappings"].is_null());
        assert!(body["message"].as_str().unwrap().contains("qqxxzz"));
        assert!(body["suggestion"].is_string());
    }

    #[tokio::test]
    async fn test_threshold_out_of_range() {
        let h = harness();

        for threshold in [30, 300] {
            let response = h
                .server
                .get("/api/ayush/search/Madhumeha")
                .add_query_param("threshold", threshold)
                .await;

            assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(response.json::<Value>()["field"], "threshold");
        }
    }

    #[tokio::test]
    async fn test_empty_mapping_table_is_unavailable() {
        let h = HarnessBuilder::new().without_mappings().build();

        let response = h.server.get("/api/ayush/search/Madhumeha").await;
        assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let health: Value = h.server.get("/api/ayush/health").await.json();
        assert_eq!(health["database"], "error");
        assert_eq!(health["total_mappings"], 0);
    }

    #[tokio::test]
    async fn test_semantic_search_ranks_results() {
        let h = harness();

        let response = h
            .server
            .post("/api/ayush/search")
            .json(&json!({ "query": "diabetes", "top_k": 3 }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        let results = body["results"].as_array().unwrap();
        assert!(!results.is_empty() && results.len() <= 3);
        let scores: Vec<f64> = results.iter().map(|r| r["combined"].as_f64().unwrap()).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_semantic_search_rejects_blank_query() {
        let h = harness();

        let response = h.server.post("/api/ayush/search").json(&json!({ "query": "" })).await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_demo_passport() {
        let h = harness();

        let passport: Value = h.server.get("/api/ayush/demo/health-passport").await.json();

        assert!(passport.is_object());
    }
}

// ============================================================================
// Allergy Tests
// ============================================================================

mod allergy_tests {
    use super::*;

    fn names(mapping: &Value) -> Vec<String> {
        mapping["candidates"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["common"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_penicillin_maps_to_antibacterial_herbs() {
        let h = harness();

        let response = h
            .server
            .post("/api/allergy/map")
            .json(&json!({ "drug": DrugFixtures::PENICILLIN }))
            .await;

        response.assert_status_ok();
        let mapping: Value = response.json();
        assert_eq!(names(&mapping), vec!["Garlic", "Guduchi", "Haritaki"]);
        let first = &mapping["candidates"][0];
        assert_eq!(first["score"], 5);
        assert_eq!(first["confidence"], "High");
        assert_eq!(first["keyword"], "antibacterial");
        assert_eq!(first["evidence_links"].as_array().unwrap().len(), 2);
        assert!(mapping["disclaimer"].is_string());
    }

    #[tokio::test]
    async fn test_put_is_accepted() {
        let h = harness();

        let response = h
            .server
            .put("/api/allergy/map")
            .json(&json!({ "drug": DrugFixtures::IBUPROFEN }))
            .await;

        response.assert_status_ok();
        let mapping: Value = response.json();
        assert_eq!(names(&mapping), vec!["Boswellia", "Ginger", "Guduchi"]);
        assert_eq!(mapping["candidates"][0]["score"], 3);
    }

    #[tokio::test]
    async fn test_unknown_drug_is_not_found() {
        let h = harness();

        let response = h
            .server
            .post("/api/allergy/map")
            .json(&json!({ "drug": DrugFixtures::UNKNOWN }))
            .await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["details"]["drug"], DrugFixtures::UNKNOWN);
    }

    #[tokio::test]
    async fn test_blank_drug_rejected() {
        let h = harness();

        let response = h.server.post("/api/allergy/map").json(&json!({ "drug": "" })).await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_normalizer_outage_is_bad_gateway() {
        let h = HarnessBuilder::new()
            .normalizer(StaticDrugNormalizer::unreachable())
            .build();

        let response = h
            .server
            .post("/api/allergy/map")
            .json(&json!({ "drug": DrugFixtures::PENICILLIN }))
            .await;

        assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
        assert_error_body(&response.json::<Value>(), "upstream_error", None);
    }

    #[tokio::test]
    async fn test_allergy_health() {
        let h = harness();
        let health: Value = h.server.get("/api/allergy/health").await.json();
        assert_eq!(health["status"], "ok");
    }
}

// ============================================================================
// Predictive Tests
// ============================================================================

mod predictive_tests {
    use super::*;

    #[tokio::test]
    async fn test_rules_only_assessment() {
        let h = harness();

        let response = h
            .server
            .post("/api/predictive/hybrid-assessment")
            .json(&PatientFixtures::diabetic())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["hybrid_recommendations"]["focus"], "diabetes");
        assert_eq!(body["sources"], json!(["rule_engine"]));
        assert!(body.get("ai_narrative").is_none());
    }

    #[tokio::test]
    async fn test_advisor_adds_narrative() {
        let h = HarnessBuilder::new().advisor(CannedAdvisor::new()).build();

        let body: Value = h
            .server
            .post("/api/predictive/hybrid-assessment")
            .json(&patient("Sunita Rao", 52, &["Fatigue"]))
            .await
            .json();

        assert_eq!(body["sources"], json!(["rule_engine", "canned_advisor"]));
        assert_eq!(body["ai_narrative"], "Integrative note for diabetes");
    }

    #[tokio::test]
    async fn test_failing_advisor_falls_back_to_rules() {
        let h = HarnessBuilder::new().advisor(CannedAdvisor::failing()).build();

        let response = h
            .server
            .post("/api/predictive/hybrid-assessment")
            .json(&patient("Sunita Rao", 52, &["Fatigue"]))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["sources"], json!(["rule_engine"]));
    }

    #[tokio::test]
    async fn test_invalid_age_rejected() {
        let h = harness();

        let response = h
            .server
            .post("/api/predictive/hybrid-assessment")
            .json(&patient("Sunita Rao", 0, &["Fatigue"]))
            .await;

        assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["field"], "patient_data.age");
    }

    #[tokio::test]
    async fn test_health_reports_advisor() {
        let h = HarnessBuilder::new().advisor(CannedAdvisor::new()).build();

        let health: Value = h.server.get("/api/predictive/health").await.json();

        assert_eq!(health["engine"], "rule_engine");
        assert_eq!(health["advisor_configured"], true);
    }
}

// ============================================================================
// Gateway Tests
// ============================================================================

mod gateway_tests {
    use super::*;

    #[tokio::test]
    async fn test_root_lists_four_services() {
        let h = harness();

        let body: Value = h.server.get("/").await.json();

        assert_eq!(body["total_services"], 4);
        assert_eq!(body["services"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_search_alias_redirects() {
        let h = harness();

        let response = h.server.get("/search/Madhumeha").add_query_param("threshold", 90).await;

        assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.header("location"),
            "/api/ayush/search/Madhumeha?threshold=90"
        );
    }

    #[tokio::test]
    async fn test_meta_alias_redirects() {
        let h = harness();

        let response = h.server.get("/meta/plans").await;

        assert_eq!(response.status_code(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.header("location"), "/api/claims/meta/plans");
    }

    #[tokio::test]
    async fn test_validate_claim_alias_is_forwarded() {
        let h = harness();
        let body = claim("Premium Plan", CatalogFixtures::FRACTURE_PACKAGE, CatalogFixtures::FRACTURE_ICD, "emergency");

        let response = h.server.post("/validate_claim").json(&body).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "valid");
        assert_eq!(h.audit.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_forwarded_error_keeps_status() {
        let h = harness();
        let body = claim("Premium Plan", "PKG999", CatalogFixtures::FRACTURE_ICD, "emergency");

        let response = h.server.post("/validate_claim").json(&body).await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["details"]["package_id"], "PKG999");
    }

    #[tokio::test]
    async fn test_unknown_path_lists_endpoints() {
        let h = harness();

        let response = h.server.get("/nowhere").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["path"], "/nowhere");
        assert_eq!(body["available_endpoints"].as_array().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let h = harness();

        let response = h.server.get("/api").await;

        response.assert_status_ok();
        assert!(!response.header("x-request-id").is_empty());
    }

    #[tokio::test]
    async fn test_health_all_operational() {
        let h = harness();

        let body: Value = h.server.get("/health").await.json();

        assert_eq!(body["status"], "healthy");
        for service in ["allergy_mapper", "ayush_who_search", "claim_validator", "predictive_analytics"] {
            assert_eq!(body["services"][service], "operational");
        }
        h.server.get("/health/ready").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_health_degraded_without_mappings() {
        let h = HarnessBuilder::new().without_mappings().build();

        let response = h.server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["services"]["ayush_who_search"], "unavailable");

        let ready = h.server.get("/health/ready").await;
        assert_eq!(ready.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
