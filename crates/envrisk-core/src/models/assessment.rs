use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorical risk label, one per priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "High Risk – Priority Intervention")]
    High,
    #[serde(rename = "Moderate-High Risk – Monitoring Required")]
    ModerateHigh,
    #[serde(rename = "Moderate Risk – Routine Monitoring")]
    Moderate,
    #[serde(rename = "Low Risk")]
    Low,
}

impl RiskCategory {
    /// Priority tier, 1 (most urgent) to 4
    pub fn priority(&self) -> u8 {
        match self {
            RiskCategory::High => 1,
            RiskCategory::ModerateHigh => 2,
            RiskCategory::Moderate => 3,
            RiskCategory::Low => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::High => "High Risk – Priority Intervention",
            RiskCategory::ModerateHigh => "Moderate-High Risk – Monitoring Required",
            RiskCategory::Moderate => "Moderate Risk – Routine Monitoring",
            RiskCategory::Low => "Low Risk",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized sub-scores that make up the composite risk, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub proximity_to_superfund: f64,
    pub air_quality_risk: f64,
    pub water_vulnerability: f64,
    pub demographic_vulnerability: f64,
}

/// Closest contamination site to an assessed location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestSuperfund {
    pub name: String,
    /// `None` when no site was available
    pub distance_km: Option<f64>,
}

/// Closest air-quality station to an assessed location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualitySummary {
    pub nearest_station: String,
    pub aqi: Option<f64>,
    pub distance_km: Option<f64>,
}

/// Environmental-justice risk assessment of one location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub composite_risk: f64,
    pub risk_factors: RiskFactors,
    pub category: RiskCategory,
    pub priority: u8,
    pub nearest_superfund: NearestSuperfund,
    pub air_quality: AirQualitySummary,
    pub water_sources_within_5km: usize,
    /// When the location was scored
    pub timestamp: DateTime<Utc>,
}
