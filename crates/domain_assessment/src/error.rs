//! Assessment errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },
}

impl AssessmentError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
