use envrisk_core::models::{MeasurementRecord, RiskAssessment};
use serde::Serialize;

use crate::demographics::DemographicSource;
use crate::scoring::{assess_location, CandidateSets};

/// A location that could not be scored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentFailure {
    /// Position of the location in the input batch
    pub index: usize,
    pub location: String,
    pub reason: String,
}

/// Outcome of scoring a batch: the surviving assessments plus every failure
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchAssessment {
    pub assessments: Vec<RiskAssessment>,
    pub failures: Vec<AssessmentFailure>,
}

impl BatchAssessment {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of assessments in the most urgent tier
    pub fn high_priority_count(&self) -> usize {
        self.assessments.iter().filter(|a| a.priority == 1).count()
    }
}

/// Score every location; a failing location is recorded and skipped, never fatal
pub fn assess_batch<D>(
    locations: &[MeasurementRecord],
    candidates: &CandidateSets<'_>,
    demographics: &D,
) -> BatchAssessment
where
    D: DemographicSource + ?Sized,
{
    let mut batch = BatchAssessment::default();

    for (index, location) in locations.iter().enumerate() {
        let vulnerability = demographics.vulnerability(location);
        match assess_location(location, candidates, vulnerability) {
            Ok(assessment) => batch.assessments.push(assessment),
            Err(e) => {
                tracing::warn!(index, location = location.label(), "skipping location: {}", e);
                batch.failures.push(AssessmentFailure {
                    index,
                    location: location.label().to_string(),
                    reason: e.to_string(),
                });
            }
        }
    }

    tracing::info!(
        assessed = batch.assessments.len(),
        failed = batch.failures.len(),
        high_priority = batch.high_priority_count(),
        "risk assessment batch complete"
    );

    batch
}
