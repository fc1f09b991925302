use envrisk_core::models::{GeoPoint, MeasurementRecord};
use envrisk_core::rounding::round_to;
use envrisk_core::Result;

use crate::distance::haversine_km;
use crate::extract::extract_point;

/// Closest candidate to a center point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a> {
    pub record: &'a MeasurementRecord,
    /// Full-precision distance in kilometers
    pub distance_km: f64,
}

/// Buffer analysis: every candidate within `radius_km` of `center`.
///
/// Matches are returned in input order as copies of the candidates carrying an
/// extra `distance_km` field rounded to 2 decimals. A candidate whose
/// coordinates cannot be extracted fails the whole call.
pub fn buffer(
    center: GeoPoint,
    radius_km: f64,
    candidates: &[MeasurementRecord],
) -> Result<Vec<MeasurementRecord>> {
    let mut within = Vec::new();

    for candidate in candidates {
        let distance = haversine_km(center, extract_point(candidate)?);
        if distance <= radius_km {
            within.push(candidate.with_field("distance_km", round_to(distance, 2)));
        }
    }

    tracing::trace!(radius_km, candidates = candidates.len(), matches = within.len(), "buffer");
    Ok(within)
}

/// Nearest neighbour of `center` among `candidates`.
///
/// Returns `Ok(None)` for an empty candidate set. Ties keep the first candidate
/// encountered.
pub fn nearest<'a>(
    center: GeoPoint,
    candidates: &'a [MeasurementRecord],
) -> Result<Option<Nearest<'a>>> {
    let mut best: Option<Nearest<'a>> = None;

    for record in candidates {
        let distance_km = haversine_km(center, extract_point(record)?);
        let closer = match best {
            Some(current) => distance_km < current.distance_km,
            None => true,
        };
        if closer {
            best = Some(Nearest { record, distance_km });
        }
    }

    Ok(best)
}
