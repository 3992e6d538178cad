//! Claim Validation Domain
//!
//! This crate decides whether a hospital claim against a Health Benefit
//! Package (HBP) is payable under a member's plan, and how much.
//!
//! # Decision pipeline
//!
//! ```text
//! ICD/package match -> plan exists -> coverage -> waiting period
//!     -> pre-authorization -> admission -> sub-limit & co-pay
//! ```
//!
//! Every step appends a [`Finding`]; the first failing step ends the
//! evaluation with a non-approving [`ClaimDecision`]. Unknown packages and
//! plans are errors, everything else is a decision.

pub mod records;
pub mod request;
pub mod finding;
pub mod decision;
pub mod score;
pub mod evaluator;
pub mod ports;
pub mod catalog;
pub mod service;
pub mod error;

pub use records::{PackageRecord, PlanRecord, CoverageRecord};
pub use request::ClaimRequest;
pub use finding::{Check, Outcome, Finding};
pub use decision::{ClaimDecision, DecisionStatus};
pub use score::score;
pub use evaluator::evaluate;
pub use ports::{CatalogPort, ClaimAuditPort, AuditEntry};
pub use catalog::{InMemoryCatalog, InMemoryAuditLog};
pub use service::{ClaimValidationService, VALIDATE_CLAIM_ACTION};
pub use error::{ClaimError, PlanSuggestion};
