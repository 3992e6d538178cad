//! Allergy mapper errors

use thiserror::Error;

use core_kernel::PortError;

#[derive(Debug, Error)]
pub enum AllergyError {
    #[error("Could not normalize '{drug}'. Try specific names (e.g., 'Penicillin G', 'Penicillin VK', 'Ibuprofen').")]
    UnknownDrug { drug: String },

    #[error("Invalid drug name: {0}")]
    InvalidDrug(String),

    #[error(transparent)]
    Port(#[from] PortError),
}

impl AllergyError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, AllergyError::UnknownDrug { .. })
    }
}
