//! Environmental-justice risk scoring of a single location
//!
//! The composite risk is a fixed weighted sum of four normalized factors:
//!
//! | factor      | weight | source                                          |
//! |-------------|--------|-------------------------------------------------|
//! | proximity   | 0.3    | distance to the nearest contamination site      |
//! | air quality | 0.3    | AQI of the nearest air-quality station          |
//! | water       | 0.2    | mean dissolved oxygen of sources within 5 km    |
//! | demographic | 0.2    | caller-supplied vulnerability factor            |
//!
//! Missing data never fails a score; each gap has a fixed default.

use chrono::Utc;
use envrisk_core::models::{
    AirQualitySummary, MeasurementRecord, NearestSuperfund, RiskAssessment, RiskCategory,
    RiskFactors,
};
use envrisk_core::rounding::round_to;
use envrisk_core::Result;
use envrisk_geo::{buffer, extract_point, nearest};

/// Proximity risk reaches zero at this distance from a site
pub const SUPERFUND_DECAY_KM: f64 = 10.0;

/// AQI at which air risk saturates at 1
pub const AQI_SATURATION: f64 = 200.0;

/// Air risk when no station reports an AQI
pub const DEFAULT_AIR_RISK: f64 = 0.5;

/// Radius of the water-source buffer
pub const WATER_BUFFER_KM: f64 = 5.0;

/// Dissolved oxygen (mg/L) treated as fully healthy; also assumed for sources without a reading
pub const HEALTHY_DISSOLVED_OXYGEN: f64 = 8.0;

/// Water risk when no source lies within the buffer
pub const DEFAULT_WATER_RISK: f64 = 0.3;

pub const PROXIMITY_WEIGHT: f64 = 0.3;
pub const AIR_WEIGHT: f64 = 0.3;
pub const WATER_WEIGHT: f64 = 0.2;
pub const DEMOGRAPHIC_WEIGHT: f64 = 0.2;

/// Lower bounds (inclusive) of the three upper risk tiers
pub const HIGH_RISK_THRESHOLD: f64 = 0.7;
pub const MODERATE_HIGH_RISK_THRESHOLD: f64 = 0.5;
pub const MODERATE_RISK_THRESHOLD: f64 = 0.3;

/// Candidate sets every location is scored against
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateSets<'a> {
    pub superfund_sites: &'a [MeasurementRecord],
    pub air_stations: &'a [MeasurementRecord],
    pub water_sources: &'a [MeasurementRecord],
}

/// Map a composite risk onto its category (first matching threshold wins)
pub fn categorize(composite: f64) -> RiskCategory {
    if composite >= HIGH_RISK_THRESHOLD {
        RiskCategory::High
    } else if composite >= MODERATE_HIGH_RISK_THRESHOLD {
        RiskCategory::ModerateHigh
    } else if composite >= MODERATE_RISK_THRESHOLD {
        RiskCategory::Moderate
    } else {
        RiskCategory::Low
    }
}

/// Linear decay from 1 at the site to 0 at [`SUPERFUND_DECAY_KM`]; no site means no risk
pub fn proximity_risk(distance_km: Option<f64>) -> f64 {
    match distance_km {
        Some(distance) => (1.0 - distance / SUPERFUND_DECAY_KM).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// AQI scaled against [`AQI_SATURATION`]; no reading is not the same as clean air
pub fn air_risk(aqi: Option<f64>) -> f64 {
    match aqi {
        Some(aqi) => (aqi / AQI_SATURATION).clamp(0.0, 1.0),
        None => DEFAULT_AIR_RISK,
    }
}

/// Oxygen deficit of the nearby water sources
pub fn water_risk(sources_nearby: &[MeasurementRecord]) -> f64 {
    if sources_nearby.is_empty() {
        return DEFAULT_WATER_RISK;
    }

    let total: f64 = sources_nearby
        .iter()
        .map(|source| source.get_f64("dissolved_oxygen").unwrap_or(HEALTHY_DISSOLVED_OXYGEN))
        .sum();
    let average = total / sources_nearby.len() as f64;

    ((HEALTHY_DISSOLVED_OXYGEN - average) / HEALTHY_DISSOLVED_OXYGEN).clamp(0.0, 1.0)
}

/// Weighted sum of the four factors
pub fn composite_risk(factors: &RiskFactors) -> f64 {
    factors.proximity_to_superfund * PROXIMITY_WEIGHT
        + factors.air_quality_risk * AIR_WEIGHT
        + factors.water_vulnerability * WATER_WEIGHT
        + factors.demographic_vulnerability * DEMOGRAPHIC_WEIGHT
}

/// Score one location against the candidate sets.
///
/// Fails only when coordinates cannot be extracted, from the location itself or
/// from one of the candidates it is compared with.
pub fn assess_location(
    location: &MeasurementRecord,
    candidates: &CandidateSets<'_>,
    demographic_vulnerability: f64,
) -> Result<RiskAssessment> {
    let point = extract_point(location)?;

    let superfund = nearest(point, candidates.superfund_sites)?;
    let superfund_distance = superfund.map(|s| round_to(s.distance_km, 2));

    let station = nearest(point, candidates.air_stations)?;
    let station_aqi = station.and_then(|s| s.record.get_f64("aqi"));

    let water_nearby = buffer(point, WATER_BUFFER_KM, candidates.water_sources)?;

    let factors = RiskFactors {
        proximity_to_superfund: proximity_risk(superfund_distance),
        air_quality_risk: air_risk(station_aqi),
        water_vulnerability: water_risk(&water_nearby),
        demographic_vulnerability: clamp_vulnerability(demographic_vulnerability, location),
    };
    // tier and urgency both read the reported (rounded) composite
    let composite = round_to(composite_risk(&factors), 3);
    let category = categorize(composite);

    tracing::debug!(
        location = location.label(),
        composite,
        priority = category.priority(),
        "assessed location"
    );

    Ok(RiskAssessment {
        location: location.label().to_string(),
        latitude: point.latitude,
        longitude: point.longitude,
        composite_risk: composite,
        risk_factors: RiskFactors {
            proximity_to_superfund: round_to(factors.proximity_to_superfund, 3),
            air_quality_risk: round_to(factors.air_quality_risk, 3),
            water_vulnerability: round_to(factors.water_vulnerability, 3),
            demographic_vulnerability: round_to(factors.demographic_vulnerability, 3),
        },
        category,
        priority: category.priority(),
        nearest_superfund: NearestSuperfund {
            name: match superfund {
                Some(site) => site.record.get_str("SITE_NAME").unwrap_or("Unknown").to_string(),
                None => "None".to_string(),
            },
            distance_km: superfund_distance,
        },
        air_quality: AirQualitySummary {
            nearest_station: match station {
                Some(station) => station.record.label().to_string(),
                None => "None".to_string(),
            },
            aqi: station_aqi,
            distance_km: station.map(|s| round_to(s.distance_km, 2)),
        },
        water_sources_within_5km: water_nearby.len(),
        timestamp: Utc::now(),
    })
}

fn clamp_vulnerability(value: f64, location: &MeasurementRecord) -> f64 {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        return value;
    }

    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    tracing::warn!(
        location = location.label(),
        value,
        clamped,
        "demographic vulnerability outside [0, 1], clamping"
    );
    clamped
}
