//! Remediation prioritization
//!
//! Areas are ranked by `priority_score = tier / (population · infrastructure)`.
//! Both weighting hooks default to the neutral factor 1.0, so out of the box the
//! ranking has exactly four levels (the risk tiers) and ties keep input order.

use envrisk_core::models::{PriorityArea, RiskAssessment};
use envrisk_core::rounding::round_to;

use crate::scoring::HIGH_RISK_THRESHOLD;

/// Multiplier used when no weighting hook is attached
pub const NEUTRAL_FACTOR: f64 = 1.0;

/// Sub-score thresholds (exclusive) that trigger recommended actions
pub const PROXIMITY_ACTION_THRESHOLD: f64 = 0.6;
pub const AIR_ACTION_THRESHOLD: f64 = 0.6;
pub const WATER_ACTION_THRESHOLD: f64 = 0.5;
pub const DEMOGRAPHIC_ACTION_THRESHOLD: f64 = 0.6;

const PROXIMITY_ACTIONS: [&str; 2] =
    ["Conduct soil and groundwater testing", "Establish community health monitoring program"];
const AIR_ACTIONS: [&str; 2] = [
    "Install air quality monitoring stations",
    "Provide air filtration resources to residents",
];
const WATER_ACTIONS: [&str; 2] = ["Test drinking water sources", "Provide water filtration systems"];
const DEMOGRAPHIC_ACTIONS: [&str; 2] = [
    "Prioritize community outreach and education",
    "Establish environmental justice task force",
];
const URGENT_ACTIONS: [&str; 2] =
    ["URGENT: Immediate assessment required", "Coordinate with state/federal agencies"];
const ROUTINE_ACTION: &str = "Continue routine monitoring";

/// Weighting hook that raises (factor > 1) or lowers the urgency of an area
pub trait AreaWeight {
    fn factor(&self, assessment: &RiskAssessment) -> f64;
}

/// Ranks risk assessments into an actionable remediation list
#[derive(Clone, Copy, Default)]
pub struct Prioritizer<'w> {
    population: Option<&'w dyn AreaWeight>,
    infrastructure: Option<&'w dyn AreaWeight>,
}

impl<'w> Prioritizer<'w> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a population-density weighting
    pub fn with_population(mut self, weight: &'w dyn AreaWeight) -> Self {
        self.population = Some(weight);
        self
    }

    /// Attach a critical-infrastructure weighting
    pub fn with_infrastructure(mut self, weight: &'w dyn AreaWeight) -> Self {
        self.infrastructure = Some(weight);
        self
    }

    /// Score, stably sort (ascending score) and rank the assessments
    pub fn prioritize(&self, assessments: &[RiskAssessment]) -> Vec<PriorityArea> {
        let mut areas: Vec<PriorityArea> = assessments
            .iter()
            .map(|assessment| PriorityArea {
                priority_score: self.priority_score(assessment),
                rank: 0,
                recommended_actions: recommend_actions(assessment),
                assessment: assessment.clone(),
            })
            .collect();

        // sort_by is stable: equal scores keep input order
        areas.sort_by(|a, b| a.priority_score.total_cmp(&b.priority_score));

        for (i, area) in areas.iter_mut().enumerate() {
            area.rank = i + 1;
        }

        areas
    }

    fn priority_score(&self, assessment: &RiskAssessment) -> f64 {
        let population = resolve_factor(self.population, assessment, "population");
        let infrastructure = resolve_factor(self.infrastructure, assessment, "infrastructure");

        round_to(f64::from(assessment.priority) / (population * infrastructure), 2)
    }
}

/// Rank with neutral weighting
pub fn prioritize_areas(assessments: &[RiskAssessment]) -> Vec<PriorityArea> {
    Prioritizer::new().prioritize(assessments)
}

fn resolve_factor(
    weight: Option<&dyn AreaWeight>,
    assessment: &RiskAssessment,
    hook: &str,
) -> f64 {
    let Some(weight) = weight else {
        return NEUTRAL_FACTOR;
    };

    let factor = weight.factor(assessment);
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        tracing::warn!(
            location = %assessment.location,
            hook,
            factor,
            "ignoring non-positive weighting factor"
        );
        NEUTRAL_FACTOR
    }
}

/// Rule-based actions for an assessment, in fixed order: superfund proximity,
/// air, water, demographic, then urgency
pub fn recommend_actions(assessment: &RiskAssessment) -> Vec<String> {
    let factors = &assessment.risk_factors;
    let mut actions: Vec<&str> = Vec::new();

    if factors.proximity_to_superfund > PROXIMITY_ACTION_THRESHOLD {
        actions.extend(PROXIMITY_ACTIONS);
    }
    if factors.air_quality_risk > AIR_ACTION_THRESHOLD {
        actions.extend(AIR_ACTIONS);
    }
    if factors.water_vulnerability > WATER_ACTION_THRESHOLD {
        actions.extend(WATER_ACTIONS);
    }
    if factors.demographic_vulnerability > DEMOGRAPHIC_ACTION_THRESHOLD {
        actions.extend(DEMOGRAPHIC_ACTIONS);
    }
    if assessment.composite_risk >= HIGH_RISK_THRESHOLD {
        actions.extend(URGENT_ACTIONS);
    }

    if actions.is_empty() {
        actions.push(ROUTINE_ACTION);
    }

    actions.into_iter().map(String::from).collect()
}
