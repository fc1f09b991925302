use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RiskCategory;

/// Point-intensity structure for map visualization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    /// Always `"heatmap"`
    #[serde(rename = "type")]
    pub kind: String,
    pub bounds: HeatmapBounds,
    pub points: Vec<HeatmapPoint>,
    pub metadata: HeatmapMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl HeatmapBounds {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapPoint {
    pub lat: f64,
    pub lon: f64,
    pub intensity: f64,
    pub category: RiskCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapMetadata {
    pub point_count: usize,
    pub generated_at: DateTime<Utc>,
}
