//! Terminology domain errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TerminologyError {
    /// The mapping table is empty or failed to load
    #[error("Mapping database not available")]
    MappingUnavailable,

    #[error("Failed to read mapping table: {0}")]
    Load(#[from] csv::Error),

    #[error("Threshold must be between {min} and {max}, got {value}")]
    InvalidThreshold { value: u8, min: u8, max: u8 },

    #[error("Invalid search query: {0}")]
    InvalidQuery(String),
}
