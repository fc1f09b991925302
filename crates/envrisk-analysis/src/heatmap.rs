use chrono::{DateTime, Utc};
use envrisk_core::models::{Heatmap, HeatmapBounds, HeatmapMetadata, HeatmapPoint, RiskAssessment};
use envrisk_core::{EnvRiskError, Result};
use geo::algorithm::bounding_rect::BoundingRect;
use geo::{MultiPoint, Point};

/// Project assessments into a heatmap stamped with the current time
pub fn project_heatmap(assessments: &[RiskAssessment]) -> Result<Heatmap> {
    project_heatmap_at(assessments, Utc::now())
}

/// Project assessments into a heatmap: one point per assessment, with the
/// composite risk as intensity, inside the batch's bounding box.
///
/// An empty batch has no bounds and fails with [`EnvRiskError::EmptyBatch`].
pub fn project_heatmap_at(
    assessments: &[RiskAssessment],
    generated_at: DateTime<Utc>,
) -> Result<Heatmap> {
    let locations: MultiPoint<f64> =
        assessments.iter().map(|a| Point::new(a.longitude, a.latitude)).collect();
    let rect = locations.bounding_rect().ok_or(EnvRiskError::EmptyBatch)?;

    let points: Vec<HeatmapPoint> = assessments
        .iter()
        .map(|a| HeatmapPoint {
            lat: a.latitude,
            lon: a.longitude,
            intensity: a.composite_risk,
            category: a.category,
        })
        .collect();

    Ok(Heatmap {
        kind: "heatmap".to_string(),
        bounds: HeatmapBounds {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lon: rect.min().x,
            max_lon: rect.max().x,
        },
        metadata: HeatmapMetadata { point_count: points.len(), generated_at },
        points,
    })
}
