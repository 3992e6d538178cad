//! Test Utilities Crate
//!
//! Shared test infrastructure for the SwasthyaSetu test suite.
//!
//! # Modules
//!
//! - `fixtures`: Reference claims, drugs and patients matching the seed data
//! - `builders`: Builders for claim and assessment requests
//! - `fakes`: In-process stand-ins for the RxNav, PubMed and advisor adapters
//! - `database`: PostgreSQL testcontainer management
//! - `assertions`: Assertion helpers for decisions and money
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod fakes;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use fakes::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
