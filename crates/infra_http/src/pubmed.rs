//! PubMed E-utilities adapter returning article links for a query

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, PortError};
use domain_allergy::LiteraturePort;

use crate::client::{UpstreamClient, UpstreamConfig};

pub const DEFAULT_PUBMED_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

const ARTICLE_BASE_URL: &str = "https://pubmed.ncbi.nlm.nih.gov";

/// Restricts searches to safety and hypersensitivity literature
const SAFETY_FILTER: &str = "AND (allergy OR hypersensitivity OR dermatitis OR safety OR adverse)";

#[derive(Debug, Clone)]
pub struct PubMedAdapter {
    client: UpstreamClient,
    base_url: String,
}

impl PubMedAdapter {
    pub fn new(base_url: impl Into<String>, config: UpstreamConfig) -> Result<Self, PortError> {
        Ok(Self {
            client: UpstreamClient::new("pubmed", config)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl DomainPort for PubMedAdapter {}

#[async_trait]
impl LiteraturePort for PubMedAdapter {
    #[instrument(skip(self))]
    async fn search_links(&self, query: &str, max_links: usize) -> Result<Vec<String>, PortError> {
        let term = search_term(query);
        let retmax = max_links.to_string();
        let response: SearchResponse = self
            .client
            .get_json(
                &format!("{}/esearch.fcgi", self.base_url),
                &[
                    ("db", "pubmed"),
                    ("retmode", "json"),
                    ("retmax", &retmax),
                    ("term", &term),
                    ("sort", "relevance"),
                ],
            )
            .await?;

        let links = response.article_links(max_links);
        debug!(count = links.len(), "PubMed links");
        Ok(links)
    }
}

pub fn search_term(query: &str) -> String {
    format!("{} {}", query, SAFETY_FILTER)
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    esearchresult: Option<SearchResult>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

impl SearchResponse {
    /// Article URLs for the first `max_links` PubMed ids
    pub fn article_links(self, max_links: usize) -> Vec<String> {
        self.esearchresult
            .map(|r| r.idlist)
            .unwrap_or_default()
            .into_iter()
            .take(max_links)
            .map(|pmid| format!("{}/{}/", ARTICLE_BASE_URL, pmid))
            .collect()
    }
}
