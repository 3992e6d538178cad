//! In-memory herb catalog
//!
//! [`InMemoryHerbStore::reference`] mirrors the herbs, functions, risks and
//! references seeded by the database migration.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError};

use crate::herb::{Herb, HerbRisk};
use crate::ports::HerbStorePort;

#[derive(Debug, Clone)]
struct StoredHerb {
    herb: Herb,
    functions: Vec<String>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryHerbStore {
    herbs: Vec<StoredHerb>,
}

impl InMemoryHerbStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_herb(mut self, herb: Herb, functions: &[&str]) -> Self {
        self.herbs.push(StoredHerb {
            herb,
            functions: functions.iter().map(|f| f.to_string()).collect(),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.herbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.herbs.is_empty()
    }

    pub fn reference() -> Self {
        Self::new()
            .with_herb(
                Herb::new("HRB001", "Neem")
                    .with_sanskrit("Nimba")
                    .with_botanical("Azadirachta indica")
                    .with_risk(HerbRisk::new("Moderate").with_note("Avoid during pregnancy"))
                    .with_ref("Charaka Samhita, Sutrasthana 4"),
                &["antibacterial", "antimicrobial", "infection"],
            )
            .with_herb(
                Herb::new("HRB002", "Turmeric")
                    .with_sanskrit("Haridra")
                    .with_botanical("Curcuma longa")
                    .with_risk(HerbRisk::new("Low").with_note("May potentiate anticoagulants"))
                    .with_ref("Bhavaprakasha Nighantu, Haritakyadi Varga"),
                &["anti-inflammatory", "antimicrobial", "analgesic"],
            )
            .with_herb(
                Herb::new("HRB003", "Tulsi")
                    .with_sanskrit("Tulasi")
                    .with_botanical("Ocimum tenuiflorum")
                    .with_risk(HerbRisk::new("Low"))
                    .with_ref("Charaka Samhita, Sutrasthana 27"),
                &["antimicrobial", "immunomodulatory", "allergy"],
            )
            .with_herb(
                Herb::new("HRB004", "Guduchi")
                    .with_sanskrit("Amrita")
                    .with_botanical("Tinospora cordifolia")
                    .with_risk(HerbRisk::new("Low").with_note("Monitor blood glucose in diabetics")),
                &["immunomodulatory", "infection", "anti-inflammatory"],
            )
            .with_herb(
                Herb::new("HRB005", "Ginger")
                    .with_sanskrit("Shunthi")
                    .with_botanical("Zingiber officinale")
                    .with_risk(HerbRisk::new("Low").with_note("Heartburn at high doses")),
                &["anti-inflammatory", "analgesic", "pain"],
            )
            .with_herb(
                Herb::new("HRB006", "Licorice")
                    .with_sanskrit("Yashtimadhu")
                    .with_botanical("Glycyrrhiza glabra")
                    .with_risk(HerbRisk::new("Moderate").with_note("Avoid in hypertension"))
                    .with_ref("Sushruta Samhita, Chikitsasthana 11"),
                &["gastroprotective", "ulcer", "acid reflux"],
            )
            .with_herb(
                Herb::new("HRB007", "Boswellia")
                    .with_sanskrit("Shallaki")
                    .with_botanical("Boswellia serrata")
                    .with_risk(HerbRisk::new("Low")),
                &["anti-inflammatory", "pain"],
            )
            .with_herb(
                Herb::new("HRB008", "Amla")
                    .with_sanskrit("Amalaki")
                    .with_botanical("Phyllanthus emblica")
                    .with_risk(HerbRisk::new("Low")),
                &["gastroprotective", "acid reflux"],
            )
            .with_herb(
                Herb::new("HRB009", "Garlic")
                    .with_sanskrit("Lashuna")
                    .with_botanical("Allium sativum")
                    .with_risk(HerbRisk::new("Moderate").with_note("Bleeding risk with anticoagulants")),
                &["antibacterial", "antimicrobial"],
            )
            .with_herb(
                Herb::new("HRB010", "Haritaki")
                    .with_sanskrit("Abhaya")
                    .with_botanical("Terminalia chebula"),
                &["antibacterial", "gastroprotective"],
            )
    }
}

impl DomainPort for InMemoryHerbStore {}

#[async_trait]
impl HerbStorePort for InMemoryHerbStore {
    async fn herbs_for_functions(&self, functions: &[String]) -> Result<Vec<Herb>, PortError> {
        let mut herbs: Vec<Herb> = self
            .herbs
            .iter()
            .filter(|stored| stored.functions.iter().any(|f| functions.contains(f)))
            .map(|stored| stored.herb.clone())
            .collect();
        herbs.sort_by(|a, b| a.common.cmp(&b.common));
        Ok(herbs)
    }
}

#[async_trait]
impl HealthCheckable for InMemoryHerbStore {
    async fn health_check(&self) -> HealthCheckResult {
        if self.herbs.is_empty() {
            HealthCheckResult::unhealthy("in_memory_herb_store", 0, "No herbs loaded")
        } else {
            HealthCheckResult::healthy("in_memory_herb_store", 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_is_sorted_by_common_name() {
        let store = InMemoryHerbStore::reference();
        let herbs = store
            .herbs_for_functions(&["antibacterial".to_string()])
            .await
            .unwrap();
        let names: Vec<_> = herbs.iter().map(|h| h.common.as_str()).collect();
        assert_eq!(names, vec!["Garlic", "Haritaki", "Neem"]);
    }

    #[tokio::test]
    async fn test_empty_keywords_find_nothing() {
        let store = InMemoryHerbStore::reference();
        assert!(store.herbs_for_functions(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_herb_without_risk_row_is_unknown() {
        let store = InMemoryHerbStore::reference();
        let herbs = store
            .herbs_for_functions(&["gastroprotective".to_string()])
            .await
            .unwrap();
        let haritaki = herbs.iter().find(|h| h.common == "Haritaki").unwrap();
        assert_eq!(haritaki.risk.label, "Unknown");
        assert!(haritaki.risk.notes.is_empty());
    }
}
