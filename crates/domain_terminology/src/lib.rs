//! AYUSH ↔ WHO Terminology Domain
//!
//! Maps traditional-medicine (AYUSH) terms to WHO ICD-11 / TM2 candidates
//! using a static, precomputed mapping table.
//!
//! Two searches are offered:
//! - **word search**: every word of the query is fuzzy-matched against both
//!   term columns and must clear a percentage threshold
//! - **blended search**: fuzzy similarity and the table's precomputed
//!   semantic similarity are blended 60/40 and ranked

pub mod mapping;
pub mod similarity;
pub mod matcher;
pub mod passport;
pub mod service;
pub mod error;

pub use mapping::{MappingRow, MappingTable};
pub use similarity::partial_ratio;
pub use matcher::{TermMatcher, ScoredMapping, MatchConfidence, SearchOptions};
pub use passport::{HealthPassport, PassportCondition, demo_health_passport};
pub use service::{TerminologyService, WordSearchOutcome};
pub use error::TerminologyError;
