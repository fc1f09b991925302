//! envrisk Core - Domain models, errors, and configuration
//!
//! This crate holds the records, assessment models and layered configuration
//! shared by the spatial and analysis crates.

pub mod config;
pub mod error;
pub mod features;
pub mod models;
pub mod rounding;

pub use error::{EnvRiskError, Result};
