//! Upstream HTTP Infrastructure
//!
//! Adapters that implement domain ports over third-party REST services:
//!
//! | adapter | port | upstream |
//! |---|---|---|
//! | [`RxNavAdapter`] | `DrugNormalizerPort` | RxNav / RxClass |
//! | [`PubMedAdapter`] | `LiteraturePort` | PubMed E-utilities `esearch` |
//! | [`GeminiAdvisor`] | `TreatmentAdvisor` | Gemini `generateContent` |
//!
//! All of them share [`UpstreamClient`], so timeouts, retries and the
//! mapping of failures onto `PortError` are uniform.
//!
//! ```rust,ignore
//! use infra_http::{RxNavAdapter, UpstreamConfig, DEFAULT_RXNAV_BASE_URL};
//!
//! let rxnav = RxNavAdapter::new(DEFAULT_RXNAV_BASE_URL, UpstreamConfig::default())?;
//! let rxcui = rxnav.find_rxcui("Ibuprofen").await?;
//! ```

pub mod client;
pub mod rxnav;
pub mod pubmed;
pub mod gemini;

pub use client::{with_retry, UpstreamClient, UpstreamConfig};
pub use rxnav::{RxNavAdapter, DEFAULT_RXNAV_BASE_URL};
pub use pubmed::{PubMedAdapter, DEFAULT_PUBMED_BASE_URL};
pub use gemini::{GeminiAdvisor, DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL};
