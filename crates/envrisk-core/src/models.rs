pub mod assessment;
pub mod heatmap;
pub mod point;
pub mod priority;
pub mod record;

pub use assessment::{AirQualitySummary, NearestSuperfund, RiskAssessment, RiskCategory, RiskFactors};
pub use heatmap::{Heatmap, HeatmapBounds, HeatmapMetadata, HeatmapPoint};
pub use point::GeoPoint;
pub use priority::PriorityArea;
pub use record::MeasurementRecord;
