//! envrisk Geo - Coordinate extraction, distance and proximity search
//!
//! This crate turns heterogeneous measurement records into canonical points
//! and answers "what is near here" questions over candidate sets.

pub mod distance;
pub mod extract;
pub mod proximity;

pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use extract::{extract_point, CoordinateShape, EXTRACTION_ORDER};
pub use proximity::{buffer, nearest, Nearest};
