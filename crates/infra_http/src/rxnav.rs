//! RxNav adapter: drug name normalization and RxClass memberships

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_allergy::{DrugNormalizerPort, NormalizedDrug, TherapeuticClass};

use crate::client::{UpstreamClient, UpstreamConfig};

pub const DEFAULT_RXNAV_BASE_URL: &str = "https://rxnav.nlm.nih.gov/REST";

#[derive(Debug, Clone)]
pub struct RxNavAdapter {
    client: UpstreamClient,
    base_url: String,
}

impl RxNavAdapter {
    pub fn new(base_url: impl Into<String>, config: UpstreamConfig) -> Result<Self, PortError> {
        Ok(Self {
            client: UpstreamClient::new("rxnav", config)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

impl DomainPort for RxNavAdapter {}

#[async_trait]
impl DrugNormalizerPort for RxNavAdapter {
    #[instrument(skip(self))]
    async fn find_rxcui(&self, drug_name: &str) -> Result<Option<String>, PortError> {
        let response: RxcuiResponse = self
            .client
            .get_json(&self.url("rxcui.json"), &[("name", drug_name)])
            .await?;
        let rxcui = response.first_rxcui();
        debug!(found = rxcui.is_some(), "RxCUI lookup");
        Ok(rxcui)
    }

    #[instrument(skip(self))]
    async fn properties(&self, rxcui: &str) -> Result<NormalizedDrug, PortError> {
        let response: PropertiesResponse = self
            .client
            .get_json(&self.url(&format!("rxcui/{}/properties.json", rxcui)), &[])
            .await?;
        Ok(response.into_drug())
    }

    #[instrument(skip(self))]
    async fn therapeutic_classes(&self, rxcui: &str) -> Result<Vec<TherapeuticClass>, PortError> {
        let response: ClassResponse = self
            .client
            .get_json(&self.url("rxclass/class/byRxcui.json"), &[("rxcui", rxcui)])
            .await?;
        let classes = response.into_classes();
        debug!(count = classes.len(), "RxClass memberships");
        Ok(classes)
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct RxcuiResponse {
    #[serde(rename = "idGroup", default)]
    id_group: Option<IdGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct IdGroup {
    #[serde(rename = "rxnormId", default)]
    rxnorm_id: Option<Vec<String>>,
}

impl RxcuiResponse {
    pub fn first_rxcui(self) -> Option<String> {
        self.id_group?.rxnorm_id?.into_iter().next()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PropertiesResponse {
    #[serde(default)]
    properties: Option<NormalizedDrug>,
}

impl PropertiesResponse {
    /// Missing properties yield an empty drug rather than an error
    pub fn into_drug(self) -> NormalizedDrug {
        self.properties.unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ClassResponse {
    #[serde(rename = "rxclassDrugInfoList", default)]
    info_list: Option<DrugInfoList>,
}

#[derive(Debug, Default, Deserialize)]
struct DrugInfoList {
    #[serde(rename = "rxclassDrugInfo", default)]
    infos: Vec<DrugInfo>,
}

#[derive(Debug, Default, Deserialize)]
struct DrugInfo {
    #[serde(rename = "rxclassMinConceptItem", default)]
    concept: ConceptItem,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConceptItem {
    class_name: Option<String>,
    class_type: Option<String>,
    class_id: Option<String>,
}

impl ClassResponse {
    /// One class per membership, repeats included; the class type doubles as source
    pub fn into_classes(self) -> Vec<TherapeuticClass> {
        self.info_list
            .map(|list| list.infos)
            .unwrap_or_default()
            .into_iter()
            .map(|info| TherapeuticClass {
                source: info.concept.class_type.clone(),
                class_name: info.concept.class_name,
                class_type: info.concept.class_type,
                class_id: info.concept.class_id,
            })
            .collect()
    }
}
