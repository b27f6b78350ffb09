//! Shared models and infrastructure used across features

pub mod logging;
pub mod models;
