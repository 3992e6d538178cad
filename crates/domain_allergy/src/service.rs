//! Allergy mapper service
//!
//! Normalizes the drug, derives indication keywords from its therapeutic
//! classes and turns the herbs serving those indications into scored
//! candidates. Evidence lookups for one keyword run concurrently; a lookup
//! that fails drops that herb for that keyword only.

use std::collections::HashSet;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use core_kernel::{HealthCheckResult, PortError};

use crate::drug::{dedupe_classes, NormalizedDrug, TherapeuticClass};
use crate::error::AllergyError;
use crate::herb::{Herb, HerbCandidate};
use crate::indications::{derive_indication_keywords, expand_keywords};
use crate::ports::{DrugNormalizerPort, HerbStorePort, LiteraturePort};
use crate::scoring::score_candidate;

pub const DISCLAIMER: &str = "This is a research aid, not medical advice. Always consult a clinician.";

pub const MAX_CANDIDATES: usize = 3;
pub const EVIDENCE_LINKS_PER_QUERY: usize = 2;

/// Result of mapping one drug to herb alternatives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugMapping {
    pub input_drug: String,
    pub normalized: NormalizedDrug,
    pub therapeutic_classes: Vec<TherapeuticClass>,
    pub indication_keywords: Vec<String>,
    pub candidates: Vec<HerbCandidate>,
    pub disclaimer: String,
}

#[derive(Clone)]
pub struct AllergyMapperService {
    normalizer: Arc<dyn DrugNormalizerPort>,
    literature: Arc<dyn LiteraturePort>,
    herbs: Arc<dyn HerbStorePort>,
}

impl AllergyMapperService {
    pub fn new(
        normalizer: Arc<dyn DrugNormalizerPort>,
        literature: Arc<dyn LiteraturePort>,
        herbs: Arc<dyn HerbStorePort>,
    ) -> Self {
        Self {
            normalizer,
            literature,
            herbs,
        }
    }

    /// Maps a drug to at most three herb candidates
    ///
    /// # Errors
    ///
    /// - `InvalidDrug` for a blank name
    /// - `UnknownDrug` when the normalizer does not recognize the name
    /// - `Port` when normalization, class lookup or the herb store fails
    #[instrument(skip(self))]
    pub async fn map_drug(&self, drug: &str) -> Result<DrugMapping, AllergyError> {
        if drug.trim().is_empty() {
            return Err(AllergyError::InvalidDrug("drug must not be empty".to_string()));
        }

        let rxcui = self
            .normalizer
            .find_rxcui(drug)
            .await?
            .ok_or_else(|| AllergyError::UnknownDrug {
                drug: drug.to_string(),
            })?;

        let normalized = self.normalizer.properties(&rxcui).await?;
        let classes = dedupe_classes(self.normalizer.therapeutic_classes(&rxcui).await?);
        let indications = derive_indication_keywords(&classes);
        let candidates = self.build_candidates(&indications).await?;

        info!(
            rxcui = %rxcui,
            classes = classes.len(),
            candidates = candidates.len(),
            "Drug mapped"
        );

        Ok(DrugMapping {
            input_drug: drug.to_string(),
            normalized,
            therapeutic_classes: classes,
            indication_keywords: indications,
            candidates,
            disclaimer: DISCLAIMER.to_string(),
        })
    }

    async fn build_candidates(&self, indications: &[String]) -> Result<Vec<HerbCandidate>, AllergyError> {
        let keywords = expand_keywords(indications);
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let herbs = self.herbs.herbs_for_functions(&keywords).await?;
        debug!(keywords = keywords.len(), herbs = herbs.len(), "Herbs fetched");

        let mut seen = HashSet::new();
        let mut merged = Vec::new();
        for keyword in &keywords {
            let lookups = herbs.iter().map(|herb| self.enrich(herb, keyword));
            for result in join_all(lookups).await {
                match result {
                    Ok(candidate) => {
                        if seen.insert(candidate.herb_id().clone()) {
                            merged.push(candidate);
                        }
                    }
                    Err(e) => warn!(keyword = %keyword, error = %e, "Evidence lookup failed, candidate dropped"),
                }
            }
        }

        merged.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.herb.common.cmp(&b.herb.common)));
        merged.truncate(MAX_CANDIDATES);
        Ok(merged)
    }

    async fn enrich(&self, herb: &Herb, keyword: &str) -> Result<HerbCandidate, PortError> {
        let query = herb.evidence_query(keyword);
        let evidence_links = self
            .literature
            .search_links(&query, EVIDENCE_LINKS_PER_QUERY)
            .await?;
        let (score, confidence) = score_candidate(herb, keyword, &evidence_links);

        Ok(HerbCandidate {
            herb: herb.clone(),
            why: vec![format!(
                "Candidate for '{keyword}' based on traditional/known use; evidence links are PubMed search results for '{query}'."
            )],
            evidence_links,
            score,
            confidence,
            keyword: keyword.to_string(),
        })
    }

    pub async fn health(&self) -> HealthCheckResult {
        let started = std::time::Instant::now();
        let result = self.herbs.herbs_for_functions(&["antibacterial".to_string()]).await;
        let latency_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(_) => HealthCheckResult::healthy("allergy_herb_store", latency_ms),
            Err(e) => HealthCheckResult::unhealthy("allergy_herb_store", latency_ms, e.to_string()),
        }
    }
}
