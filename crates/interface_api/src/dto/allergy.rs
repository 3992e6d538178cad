//! Allergy mapper DTOs

use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct MapRequest {
    #[validate(length(min = 1, max = 200, message = "drug must be 1 to 200 characters"))]
    pub drug: String,
}
