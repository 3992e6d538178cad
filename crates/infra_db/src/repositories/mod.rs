//! Repository implementations
//!
//! Repositories encapsulate SQL and return plain row types. Mapping rows to
//! domain records happens in [`crate::adapters`].

pub mod audit;
pub mod catalog;
pub mod herbs;

pub use audit::AuditRepository;
pub use catalog::CatalogRepository;
pub use herbs::HerbRepository;
