//! Flattening of GeoJSON features and raw JSON batches into measurement records

use geojson::{Feature, GeoJson};
use serde_json::Value;

use crate::error::{EnvRiskError, Result};
use crate::models::MeasurementRecord;

/// Parse a batch of records from JSON text.
///
/// Accepts a GeoJSON `FeatureCollection`, a single `Feature`, or a plain JSON
/// array of flat record objects.
pub fn parse_records(content: &str) -> Result<Vec<MeasurementRecord>> {
    let value: Value = serde_json::from_str(content).map_err(|e| {
        EnvRiskError::InvalidFeatureCollection { reason: format!("Failed to parse JSON: {}", e) }
    })?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                MeasurementRecord::from_value(item).ok_or_else(|| {
                    EnvRiskError::InvalidFeatureCollection {
                        reason: format!("Record {} is not a JSON object", i),
                    }
                })
            })
            .collect(),
        other => {
            let geojson = GeoJson::from_json_value(other).map_err(|e| {
                EnvRiskError::InvalidFeatureCollection {
                    reason: format!("Failed to parse GeoJSON: {}", e),
                }
            })?;
            records_from_geojson(geojson)
        }
    }
}

/// Flatten every feature of a GeoJSON object into a record
pub fn records_from_geojson(geojson: GeoJson) -> Result<Vec<MeasurementRecord>> {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            collection.features.into_iter().map(record_from_feature).collect()
        }
        GeoJson::Feature(feature) => Ok(vec![record_from_feature(feature)?]),
        GeoJson::Geometry(_) => Err(EnvRiskError::InvalidFeatureCollection {
            reason: "Expected a Feature or FeatureCollection, found a bare Geometry".to_string(),
        }),
    }
}

/// A feature's properties plus its raw geometry under the `geometry` key
pub fn record_from_feature(feature: Feature) -> Result<MeasurementRecord> {
    let mut fields = feature.properties.unwrap_or_default();

    if let Some(geometry) = feature.geometry {
        let geometry =
            serde_json::to_value(&geometry).map_err(|e| EnvRiskError::Serialization(e.to_string()))?;
        fields.insert("geometry".to_string(), geometry);
    }

    Ok(MeasurementRecord::new(fields))
}
