//! Drug Allergy Mapper Domain
//!
//! Given a drug a patient is allergic to, suggests Ayurvedic herbs that
//! serve a similar therapeutic purpose.
//!
//! ```text
//! drug name -> RxNorm concept -> therapeutic classes -> indication keywords
//!     -> herbs by function -> PubMed evidence -> scored candidates (top 3)
//! ```
//!
//! This is a research aid. Every response carries [`DISCLAIMER`].

pub mod drug;
pub mod indications;
pub mod herb;
pub mod scoring;
pub mod ports;
pub mod store;
pub mod service;
pub mod error;

pub use drug::{NormalizedDrug, TherapeuticClass, dedupe_classes};
pub use indications::{derive_indication_keywords, expand_keywords};
pub use herb::{Herb, HerbRisk, HerbCandidate};
pub use scoring::{score_candidate, CandidateConfidence};
pub use ports::{DrugNormalizerPort, LiteraturePort, HerbStorePort};
pub use store::InMemoryHerbStore;
pub use service::{AllergyMapperService, DrugMapping, DISCLAIMER};
pub use error::AllergyError;
