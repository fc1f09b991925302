use envrisk_analysis::AssessmentFailure;
use envrisk_core::models::{GeoPoint, PriorityArea};
use serde::Serialize;

/// Output for analyze command
#[derive(Debug, Serialize)]
pub struct AnalyzeOutput {
    pub locations_assessed: usize,
    pub high_priority_count: usize,
    pub failures: Vec<AssessmentFailure>,
    pub top_priorities: Vec<PriorityArea>,
    pub files: Option<OutputFiles>,
}

/// Artifacts written by the analyze command
#[derive(Debug, Serialize)]
pub struct OutputFiles {
    pub risk_assessments: String,
    pub priority_areas: String,
    pub heatmap: Option<String>,
}

/// Output for distance command
#[derive(Debug, Serialize)]
pub struct DistanceOutput {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub distance_km: f64,
}

/// Output for config command
#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    pub values: Vec<ConfigEntry>,
}

#[derive(Debug, Serialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
    pub source: String,
}
