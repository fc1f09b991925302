//! Demographic vulnerability inputs
//!
//! No census source is part of the engine; callers supply the factor per
//! location through a [`DemographicSource`].

use envrisk_core::config::{LayeredConfig, DEFAULT_DEMOGRAPHIC_VULNERABILITY};
use envrisk_core::models::MeasurementRecord;
use std::collections::BTreeMap;

/// Supplies the demographic vulnerability factor, in [0, 1], of a location
pub trait DemographicSource {
    fn vulnerability(&self, location: &MeasurementRecord) -> f64;
}

/// The same factor for every location
impl DemographicSource for f64 {
    fn vulnerability(&self, _location: &MeasurementRecord) -> f64 {
        *self
    }
}

/// A default factor with per-location overrides keyed by location label
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicTable {
    default: f64,
    overrides: BTreeMap<String, f64>,
}

impl DemographicTable {
    pub fn new(default: f64) -> Self {
        Self { default, overrides: BTreeMap::new() }
    }

    pub fn with_override(mut self, location: impl Into<String>, vulnerability: f64) -> Self {
        self.overrides.insert(location.into(), vulnerability);
        self
    }

    /// Build from the effective configuration
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            default: config.demographic_vulnerability.value,
            overrides: config.demographics.clone(),
        }
    }
}

impl Default for DemographicTable {
    fn default() -> Self {
        Self::new(DEFAULT_DEMOGRAPHIC_VULNERABILITY)
    }
}

impl DemographicSource for DemographicTable {
    fn vulnerability(&self, location: &MeasurementRecord) -> f64 {
        self.overrides.get(location.label()).copied().unwrap_or(self.default)
    }
}
