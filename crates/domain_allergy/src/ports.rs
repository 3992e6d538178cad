//! Outbound ports for the allergy mapper

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError};
use crate::drug::{NormalizedDrug, TherapeuticClass};
use crate::herb::Herb;

/// Drug normalization against a drug terminology service (RxNorm)
#[async_trait]
pub trait DrugNormalizerPort: DomainPort {
    /// Concept id for a drug name, `None` when the name is not recognized
    async fn find_rxcui(&self, drug_name: &str) -> Result<Option<String>, PortError>;

    async fn properties(&self, rxcui: &str) -> Result<NormalizedDrug, PortError>;

    /// Class memberships, possibly with repeats
    async fn therapeutic_classes(&self, rxcui: &str) -> Result<Vec<TherapeuticClass>, PortError>;
}

/// Literature search returning article links
#[async_trait]
pub trait LiteraturePort: DomainPort {
    async fn search_links(&self, query: &str, max_links: usize) -> Result<Vec<String>, PortError>;
}

/// Herb catalog lookup by function keyword
#[async_trait]
pub trait HerbStorePort: DomainPort {
    /// Herbs having any of the given functions, ordered by common name
    async fn herbs_for_functions(&self, functions: &[String]) -> Result<Vec<Herb>, PortError>;
}
