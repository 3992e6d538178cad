//! Request handlers, one module per mounted service

pub mod allergy;
pub mod ayush;
pub mod claims;
pub mod gateway;
pub mod health;
pub mod predictive;
