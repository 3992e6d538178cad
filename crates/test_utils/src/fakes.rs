//! In-process fakes for the outbound adapters
//!
//! Stand-ins for RxNav, PubMed and the treatment advisor, so API and service
//! tests run without network access.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use core_kernel::{DomainPort, PortError};
use domain_allergy::{DrugNormalizerPort, LiteraturePort, NormalizedDrug, TherapeuticClass};
use domain_assessment::{AdvisorContext, TreatmentAdvisor};

use crate::fixtures::DrugFixtures;

struct StaticDrug {
    name: &'static str,
    rxcui: &'static str,
    classes: Vec<TherapeuticClass>,
}

static REFERENCE_DRUGS: Lazy<Vec<StaticDrug>> = Lazy::new(|| {
    vec![
        StaticDrug {
            name: DrugFixtures::PENICILLIN,
            rxcui: DrugFixtures::PENICILLIN_RXCUI,
            classes: vec![
                TherapeuticClass::new("Penicillins with extended spectrum", "ATC1-4", "J01CA"),
                TherapeuticClass::new("Penicillin-class Antibacterial", "EPC", "N0000175503"),
                TherapeuticClass::new("Penicillin-class Antibacterial", "EPC", "N0000175503"),
            ],
        },
        StaticDrug {
            name: DrugFixtures::IBUPROFEN,
            rxcui: DrugFixtures::IBUPROFEN_RXCUI,
            classes: vec![TherapeuticClass::new(
                "Nonsteroidal Anti-inflammatory Drug",
                "EPC",
                "N0000175722",
            )],
        },
        StaticDrug {
            name: DrugFixtures::VITAMIN_D,
            rxcui: "2418",
            classes: vec![TherapeuticClass::new("Vitamin D", "ATC1-4", "A11CC")],
        },
    ]
});

/// Drug normalizer answering from a fixed table of three drugs
#[derive(Debug, Default)]
pub struct StaticDrugNormalizer {
    unreachable: bool,
}

impl StaticDrugNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A normalizer whose every call fails with an upstream 503
    pub fn unreachable() -> Self {
        Self { unreachable: true }
    }

    fn check(&self) -> Result<(), PortError> {
        if self.unreachable {
            Err(PortError::upstream("rxnav", Some(503), "Service Unavailable"))
        } else {
            Ok(())
        }
    }

    fn by_rxcui(rxcui: &str) -> Option<&'static StaticDrug> {
        REFERENCE_DRUGS.iter().find(|d| d.rxcui == rxcui)
    }
}

impl DomainPort for StaticDrugNormalizer {}

#[async_trait]
impl DrugNormalizerPort for StaticDrugNormalizer {
    async fn find_rxcui(&self, drug_name: &str) -> Result<Option<String>, PortError> {
        self.check()?;
        Ok(REFERENCE_DRUGS
            .iter()
            .find(|d| d.name.eq_ignore_ascii_case(drug_name.trim()))
            .map(|d| d.rxcui.to_string()))
    }

    async fn properties(&self, rxcui: &str) -> Result<NormalizedDrug, PortError> {
        self.check()?;
        let drug = Self::by_rxcui(rxcui).ok_or_else(|| PortError::not_found("rxcui", rxcui))?;
        Ok(NormalizedDrug {
            rxcui: Some(drug.rxcui.to_string()),
            name: Some(drug.name.to_lowercase()),
            synonym: None,
            tty: Some("IN".to_string()),
            language: Some("ENG".to_string()),
        })
    }

    async fn therapeutic_classes(&self, rxcui: &str) -> Result<Vec<TherapeuticClass>, PortError> {
        self.check()?;
        Ok(Self::by_rxcui(rxcui)
            .map(|d| d.classes.clone())
            .unwrap_or_default())
    }
}

/// Literature search returning deterministic PubMed-style links
#[derive(Debug)]
pub struct StaticLiterature {
    links_per_query: usize,
    failing_query: Option<String>,
    calls: AtomicUsize,
}

impl Default for StaticLiterature {
    fn default() -> Self {
        Self::with_links(2)
    }
}

impl StaticLiterature {
    pub fn with_links(links_per_query: usize) -> Self {
        Self {
            links_per_query,
            failing_query: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails with a timeout whenever `query` is searched
    pub fn failing_on(mut self, query: impl Into<String>) -> Self {
        self.failing_query = Some(query.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DomainPort for StaticLiterature {}

#[async_trait]
impl LiteraturePort for StaticLiterature {
    async fn search_links(&self, query: &str, max_links: usize) -> Result<Vec<String>, PortError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_query.as_deref() == Some(query) {
            return Err(PortError::timeout("esearch.fcgi", std::time::Duration::from_secs(30)));
        }
        Ok((0..self.links_per_query.min(max_links))
            .map(|i| format!("https://pubmed.ncbi.nlm.nih.gov/{}/", 10_000_000 + i))
            .collect())
    }
}

/// Treatment advisor returning canned text, or failing on demand
#[derive(Debug, Default)]
pub struct CannedAdvisor {
    failure: bool,
    prompts: std::sync::Mutex<HashMap<String, String>>,
}

impl CannedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An advisor whose every call fails with an upstream 429
    pub fn failing() -> Self {
        Self {
            failure: true,
            ..Self::default()
        }
    }

    /// Prompt last sent for a condition
    pub fn prompt_for(&self, condition: &str) -> Option<String> {
        self.prompts
            .lock()
            .ok()
            .and_then(|p| p.get(condition).cloned())
    }
}

impl DomainPort for CannedAdvisor {}

#[async_trait]
impl TreatmentAdvisor for CannedAdvisor {
    async fn narrative(&self, context: &AdvisorContext) -> Result<String, PortError> {
        if self.failure {
            return Err(PortError::upstream("gemini", Some(429), "quota exceeded"));
        }
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.insert(context.primary_condition.clone(), context.prompt());
        }
        Ok(format!("Integrative note for {}", context.primary_condition))
    }

    fn name(&self) -> &str {
        "canned_advisor"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_normalizer_is_case_insensitive() {
        let normalizer = StaticDrugNormalizer::new();
        let rxcui = normalizer.find_rxcui("penicillin g").await.unwrap();
        assert_eq!(rxcui.as_deref(), Some("7980"));
        assert!(normalizer.find_rxcui(DrugFixtures::UNKNOWN).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_literature_respects_max_links() {
        let literature = StaticLiterature::with_links(5);
        let links = literature.search_links("Curcuma longa analgesic", 2).await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(literature.calls(), 1);
    }
}
