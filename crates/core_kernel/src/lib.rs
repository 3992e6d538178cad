//! Core Kernel - Foundational types shared by the SwasthyaSetu services
//!
//! This crate provides the building blocks used across all domain modules:
//! - Money types with precise decimal arithmetic (claims are settled in INR)
//! - Catalog codes and generated identifiers
//! - Port infrastructure (errors, health checks, retry policy)

pub mod money;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use identifiers::{PackageId, PlanId, MemberId, DiagnosisCode, AyushCode, HerbId, AuditEventId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth, RetryPolicy,
};
