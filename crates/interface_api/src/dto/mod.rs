//! Request and response bodies

pub mod allergy;
pub mod ayush;
pub mod claims;
