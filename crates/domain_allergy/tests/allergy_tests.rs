//! Tests for the allergy mapper service

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};
use domain_allergy::{
    AllergyError, AllergyMapperService, CandidateConfidence, DrugNormalizerPort, InMemoryHerbStore,
    LiteraturePort, NormalizedDrug, TherapeuticClass, DISCLAIMER,
};

// ============================================================================
// Fakes
// ============================================================================

#[derive(Default)]
struct FakeNormalizer {
    drugs: HashMap<String, (String, Vec<TherapeuticClass>)>,
    unreachable: bool,
}

impl FakeNormalizer {
    fn with_drug(mut self, name: &str, rxcui: &str, classes: Vec<TherapeuticClass>) -> Self {
        self.drugs
            .insert(name.to_lowercase(), (rxcui.to_string(), classes));
        self
    }

    fn reference() -> Self {
        Self::default()
            .with_drug(
                "Penicillin G",
                "7980",
                vec![
                    TherapeuticClass::new("Penicillins with extended spectrum", "ATC1-4", "J01CA"),
                    TherapeuticClass::new("Penicillin-class Antibacterial", "EPC", "N0000175503"),
                    TherapeuticClass::new("Penicillin-class Antibacterial", "EPC", "N0000175503"),
                ],
            )
            .with_drug(
                "Ibuprofen",
                "5640",
                vec![TherapeuticClass::new(
                    "Nonsteroidal Anti-inflammatory Drug",
                    "EPC",
                    "N0000175722",
                )],
            )
            .with_drug(
                "Cholecalciferol",
                "2418",
                vec![TherapeuticClass::new("Vitamin D", "ATC1-4", "A11CC")],
            )
    }
}

impl DomainPort for FakeNormalizer {}

#[async_trait]
impl DrugNormalizerPort for FakeNormalizer {
    async fn find_rxcui(&self, drug_name: &str) -> Result<Option<String>, PortError> {
        if self.unreachable {
            return Err(PortError::upstream("rxnav", Some(503), "Service Unavailable"));
        }
        Ok(self
            .drugs
            .get(&drug_name.to_lowercase())
            .map(|(rxcui, _)| rxcui.clone()))
    }

    async fn properties(&self, rxcui: &str) -> Result<NormalizedDrug, PortError> {
        let name = self
            .drugs
            .iter()
            .find(|(_, (id, _))| id == rxcui)
            .map(|(name, _)| name.clone());
        Ok(NormalizedDrug {
            rxcui: Some(rxcui.to_string()),
            name,
            tty: Some("IN".to_string()),
            language: Some("ENG".to_string()),
            ..Default::default()
        })
    }

    async fn therapeutic_classes(&self, rxcui: &str) -> Result<Vec<TherapeuticClass>, PortError> {
        Ok(self
            .drugs
            .values()
            .find(|(id, _)| id == rxcui)
            .map(|(_, classes)| classes.clone())
            .unwrap_or_default())
    }
}

struct FakeLiterature {
    links: usize,
    failing_query: Option<String>,
}

impl FakeLiterature {
    fn with_links(links: usize) -> Self {
        Self {
            links,
            failing_query: None,
        }
    }

    fn failing_on(query: &str) -> Self {
        Self {
            links: 2,
            failing_query: Some(query.to_string()),
        }
    }
}

impl DomainPort for FakeLiterature {}

#[async_trait]
impl LiteraturePort for FakeLiterature {
    async fn search_links(&self, query: &str, max_links: usize) -> Result<Vec<String>, PortError> {
        if self.failing_query.as_deref() == Some(query) {
            return Err(PortError::timeout("pubmed_esearch", std::time::Duration::from_secs(15)));
        }
        Ok((0..self.links.min(max_links))
            .map(|i| format!("https://pubmed.ncbi.nlm.nih.gov/{}/", 30000000 + i))
            .collect())
    }
}

fn service(literature: FakeLiterature) -> AllergyMapperService {
    AllergyMapperService::new(
        Arc::new(FakeNormalizer::reference()),
        Arc::new(literature),
        Arc::new(InMemoryHerbStore::reference()),
    )
}

fn names(mapping: &domain_allergy::DrugMapping) -> Vec<&str> {
    mapping
        .candidates
        .iter()
        .map(|c| c.herb.common.as_str())
        .collect()
}

// ============================================================================
// Mapping
// ============================================================================

mod mapping_tests {
    use super::*;

    #[tokio::test]
    async fn test_penicillin_maps_to_antibacterial_herbs() {
        let mapping = service(FakeLiterature::with_links(2))
            .map_drug("Penicillin G")
            .await
            .unwrap();

        assert_eq!(mapping.input_drug, "Penicillin G");
        assert_eq!(mapping.normalized.rxcui.as_deref(), Some("7980"));
        assert_eq!(mapping.therapeutic_classes.len(), 2);
        assert_eq!(
            mapping.indication_keywords,
            vec!["antibacterial", "antimicrobial", "infection"]
        );
        assert_eq!(names(&mapping), vec!["Garlic", "Guduchi", "Haritaki"]);
        for candidate in &mapping.candidates {
            assert_eq!(candidate.score, 5);
            assert_eq!(candidate.confidence, CandidateConfidence::High);
            assert_eq!(candidate.keyword, "antibacterial");
            assert_eq!(candidate.evidence_links.len(), 2);
        }
        assert_eq!(mapping.disclaimer, DISCLAIMER);
    }

    #[tokio::test]
    async fn test_first_keyword_wins_on_merge() {
        let mapping = service(FakeLiterature::with_links(2))
            .map_drug("Ibuprofen")
            .await
            .unwrap();

        // "analgesic" sorts first and is not a strong keyword
        assert_eq!(
            mapping.indication_keywords,
            vec!["analgesic", "anti-inflammatory", "pain"]
        );
        assert_eq!(names(&mapping), vec!["Boswellia", "Ginger", "Guduchi"]);
        assert!(mapping.candidates.iter().all(|c| c.keyword == "analgesic"));
        assert!(mapping.candidates.iter().all(|c| c.score == 3));
    }

    #[tokio::test]
    async fn test_failed_lookup_drops_only_that_enrichment() {
        let mapping = service(FakeLiterature::failing_on("Allium sativum antibacterial"))
            .map_drug("Penicillin G")
            .await
            .unwrap();

        assert_eq!(names(&mapping), vec!["Guduchi", "Haritaki", "Neem"]);
    }

    #[tokio::test]
    async fn test_without_evidence_scores_drop() {
        let mapping = service(FakeLiterature::with_links(0))
            .map_drug("Penicillin G")
            .await
            .unwrap();

        assert!(mapping
            .candidates
            .iter()
            .all(|c| c.score == 3 && c.confidence == CandidateConfidence::Medium));
        assert!(mapping.candidates.iter().all(|c| c.evidence_links.is_empty()));
    }

    #[tokio::test]
    async fn test_why_names_the_literature_query() {
        let mapping = service(FakeLiterature::with_links(1))
            .map_drug("Penicillin G")
            .await
            .unwrap();

        let garlic = &mapping.candidates[0];
        assert_eq!(
            garlic.why,
            vec!["Candidate for 'antibacterial' based on traditional/known use; evidence links are PubMed search results for 'Allium sativum antibacterial'."]
        );
    }

    #[tokio::test]
    async fn test_unmapped_class_yields_no_candidates() {
        let mapping = service(FakeLiterature::with_links(2))
            .map_drug("Cholecalciferol")
            .await
            .unwrap();

        assert!(mapping.indication_keywords.is_empty());
        assert!(mapping.candidates.is_empty());
        assert_eq!(mapping.disclaimer, DISCLAIMER);
    }
}

// ============================================================================
// Errors
// ============================================================================

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_drug_carries_hint() {
        let err = service(FakeLiterature::with_links(2))
            .map_drug("Unobtainium")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Could not normalize 'Unobtainium'. Try specific names (e.g., 'Penicillin G', 'Penicillin VK', 'Ibuprofen')."
        );
    }

    #[tokio::test]
    async fn test_blank_drug_is_rejected() {
        let err = service(FakeLiterature::with_links(2))
            .map_drug("   ")
            .await
            .unwrap_err();
        assert!(matches!(err, AllergyError::InvalidDrug(_)));
    }

    #[tokio::test]
    async fn test_normalizer_outage_propagates() {
        let normalizer = FakeNormalizer {
            unreachable: true,
            ..FakeNormalizer::reference()
        };
        let service = AllergyMapperService::new(
            Arc::new(normalizer),
            Arc::new(FakeLiterature::with_links(2)),
            Arc::new(InMemoryHerbStore::reference()),
        );

        let err = service.map_drug("Ibuprofen").await.unwrap_err();
        assert!(matches!(err, AllergyError::Port(PortError::Upstream { .. })));
    }
}

// ============================================================================
// Serialization
// ============================================================================

mod serialization_tests {
    use super::*;

    #[tokio::test]
    async fn test_candidate_json_is_flat() {
        let mapping = service(FakeLiterature::with_links(2))
            .map_drug("Penicillin G")
            .await
            .unwrap();
        let json = serde_json::to_value(&mapping.candidates[0]).unwrap();

        assert_eq!(json["herb_id"], "HRB009");
        assert_eq!(json["common"], "Garlic");
        assert_eq!(json["botanical"], "Allium sativum");
        assert_eq!(json["risk"]["label"], "Moderate");
        assert_eq!(json["confidence"], "High");
        assert_eq!(json["score"], 5);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

mod property_tests {
    use domain_allergy::{derive_indication_keywords, score_candidate, Herb};
    use proptest::prelude::*;

    use super::*;

    fn arb_class_name() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Penicillin-class Antibacterial".to_string()),
            Just("Nonsteroidal Anti-inflammatory Drug".to_string()),
            Just("Opioid Analgesic".to_string()),
            Just("Vitamin D".to_string()),
            "[A-Za-z -]{0,30}",
        ]
    }

    proptest! {
        #[test]
        fn score_stays_in_range(
            keyword in prop_oneof![Just("antibacterial"), Just("pain"), Just("infection"), Just("anti-inflammatory")],
            links in 0usize..5,
            botanical in any::<bool>(),
        ) {
            let mut herb = Herb::new("HRB100", "Test herb");
            if botanical {
                herb = herb.with_botanical("Testus herbalis");
            }
            let evidence: Vec<String> = (0..links).map(|i| format!("https://pubmed.ncbi.nlm.nih.gov/{}/", i)).collect();

            let (score, confidence) = score_candidate(&herb, keyword, &evidence);

            prop_assert!(score <= 5);
            prop_assert_eq!(confidence, CandidateConfidence::from_score(score));
        }

        #[test]
        fn keywords_are_sorted_and_unique(names in proptest::collection::vec(arb_class_name(), 0..6)) {
            let classes: Vec<TherapeuticClass> = names
                .iter()
                .map(|n| TherapeuticClass::new(n.as_str(), "EPC", "N0"))
                .collect();

            let keywords = derive_indication_keywords(&classes);

            prop_assert!(keywords.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
