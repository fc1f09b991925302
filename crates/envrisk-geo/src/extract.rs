//! Coordinate extraction from heterogeneous measurement records
//!
//! Upstream sources disagree on how a location is written down: air stations
//! carry `latitude`/`longitude`, EPA site listings carry `LATITUDE`/`LONGITUDE`,
//! and flattened GeoJSON features carry a `geometry` object whose coordinates
//! are `[longitude, latitude]`. Each layout is a [`CoordinateShape`]; they are
//! tried in [`EXTRACTION_ORDER`] and the first one whose keys are present wins.

use envrisk_core::models::record::value_as_f64;
use envrisk_core::models::{GeoPoint, MeasurementRecord};
use envrisk_core::{EnvRiskError, Result};
use serde_json::Value;

/// A way of writing a point location into a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateShape {
    /// `latitude` / `longitude` scalar fields
    FlatLowercase,
    /// `LATITUDE` / `LONGITUDE` scalar fields
    FlatUppercase,
    /// `geometry.coordinates` as `[longitude, latitude]`
    GeometryCoordinates,
}

/// Shapes in the order they are attempted
pub const EXTRACTION_ORDER: [CoordinateShape; 3] = [
    CoordinateShape::FlatLowercase,
    CoordinateShape::FlatUppercase,
    CoordinateShape::GeometryCoordinates,
];

impl CoordinateShape {
    /// Whether the record carries the keys of this shape
    pub fn matches(&self, record: &MeasurementRecord) -> bool {
        match self {
            CoordinateShape::FlatLowercase => {
                record.contains("latitude") && record.contains("longitude")
            }
            CoordinateShape::FlatUppercase => {
                record.contains("LATITUDE") && record.contains("LONGITUDE")
            }
            CoordinateShape::GeometryCoordinates => record
                .get("geometry")
                .and_then(Value::as_object)
                .is_some_and(|geometry| geometry.contains_key("coordinates")),
        }
    }

    /// Read a point assuming this shape matches
    pub fn read(&self, record: &MeasurementRecord) -> Result<GeoPoint> {
        match self {
            CoordinateShape::FlatLowercase => read_flat(record, "latitude", "longitude"),
            CoordinateShape::FlatUppercase => read_flat(record, "LATITUDE", "LONGITUDE"),
            CoordinateShape::GeometryCoordinates => read_geometry(record),
        }
    }
}

/// Extract the canonical point of a record.
///
/// Fails with [`EnvRiskError::CoordinateExtraction`] when no shape matches, or
/// when the first matching shape holds non-numeric or out-of-range values.
pub fn extract_point(record: &MeasurementRecord) -> Result<GeoPoint> {
    match EXTRACTION_ORDER.iter().find(|shape| shape.matches(record)) {
        Some(shape) => shape.read(record),
        None => Err(EnvRiskError::coordinates(format!(
            "no latitude/longitude, LATITUDE/LONGITUDE or geometry.coordinates in record of location '{}'",
            record.label()
        ))),
    }
}

fn read_flat(record: &MeasurementRecord, lat_key: &str, lon_key: &str) -> Result<GeoPoint> {
    let latitude = record
        .get_f64(lat_key)
        .ok_or_else(|| EnvRiskError::coordinates(format!("'{}' is not numeric", lat_key)))?;
    let longitude = record
        .get_f64(lon_key)
        .ok_or_else(|| EnvRiskError::coordinates(format!("'{}' is not numeric", lon_key)))?;

    GeoPoint::new(latitude, longitude)
}

fn read_geometry(record: &MeasurementRecord) -> Result<GeoPoint> {
    let coordinates = record
        .get("geometry")
        .and_then(|geometry| geometry.get("coordinates"))
        .and_then(Value::as_array)
        .ok_or_else(|| EnvRiskError::coordinates("geometry.coordinates is not an array"))?;

    // GeoJSON order is [longitude, latitude]
    let longitude = coordinates.first().and_then(value_as_f64);
    let latitude = coordinates.get(1).and_then(value_as_f64);

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => GeoPoint::new(latitude, longitude),
        _ => Err(EnvRiskError::coordinates(
            "geometry.coordinates must start with numeric [longitude, latitude]",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> MeasurementRecord {
        MeasurementRecord::from_value(value).unwrap()
    }

    #[test]
    fn test_lowercase_fields() {
        let point = extract_point(&record(json!({"latitude": 34.0522, "longitude": -118.2437})))
            .unwrap();
        assert_eq!(point.latitude, 34.0522);
        assert_eq!(point.longitude, -118.2437);
    }

    #[test]
    fn test_uppercase_fields() {
        let point =
            extract_point(&record(json!({"LATITUDE": 40.6653, "LONGITUDE": -122.5236}))).unwrap();
        assert_eq!(point.latitude, 40.6653);
        assert_eq!(point.longitude, -122.5236);
    }

    #[test]
    fn test_geometry_axis_order_is_swapped() {
        let point = extract_point(&record(json!({
            "geometry": {"type": "Point", "coordinates": [-117.1611, 32.7157]}
        })))
        .unwrap();
        assert_eq!(point.latitude, 32.7157);
        assert_eq!(point.longitude, -117.1611);
    }

    #[test]
    fn test_lowercase_takes_priority() {
        let point = extract_point(&record(json!({
            "latitude": 1.0,
            "longitude": 2.0,
            "LATITUDE": 3.0,
            "LONGITUDE": 4.0,
            "geometry": {"coordinates": [6.0, 5.0]}
        })))
        .unwrap();
        assert_eq!((point.latitude, point.longitude), (1.0, 2.0));
    }

    #[test]
    fn test_uppercase_before_geometry() {
        let point = extract_point(&record(json!({
            "LATITUDE": 3.0,
            "LONGITUDE": 4.0,
            "geometry": {"coordinates": [6.0, 5.0]}
        })))
        .unwrap();
        assert_eq!((point.latitude, point.longitude), (3.0, 4.0));
    }

    #[test]
    fn test_half_a_shape_does_not_match() {
        // lowercase latitude alone falls through to the geometry shape
        let point = extract_point(&record(json!({
            "latitude": 1.0,
            "geometry": {"coordinates": [6.0, 5.0]}
        })))
        .unwrap();
        assert_eq!((point.latitude, point.longitude), (5.0, 6.0));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let point =
            extract_point(&record(json!({"latitude": "33.8121", "longitude": "-117.8897"})))
                .unwrap();
        assert_eq!(point.latitude, 33.8121);
    }

    #[test]
    fn test_no_shape_fails() {
        let err = extract_point(&record(json!({"location": "Nowhere", "aqi": 50}))).unwrap_err();
        match err {
            EnvRiskError::CoordinateExtraction { reason } => assert!(reason.contains("Nowhere")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_matched_shape_fails() {
        assert!(extract_point(&record(json!({"latitude": "north", "longitude": 1.0}))).is_err());
        assert!(extract_point(&record(json!({"latitude": 95.0, "longitude": 1.0}))).is_err());
        assert!(extract_point(&record(json!({"geometry": {"coordinates": [1.0]}}))).is_err());
        assert!(extract_point(&record(json!({"geometry": {"coordinates": "1,2"}}))).is_err());
    }

    #[test]
    fn test_geometry_without_coordinates_does_not_match() {
        let rec = record(json!({"geometry": {"type": "Point"}}));
        assert!(!CoordinateShape::GeometryCoordinates.matches(&rec));
        assert!(extract_point(&rec).is_err());
    }
}
