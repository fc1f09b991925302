use serde::{Deserialize, Serialize};

use super::RiskAssessment;

/// A ranked remediation target
///
/// Serializes flat: the assessment fields sit next to the ranking fields, so a
/// saved priority list can be read back as assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityArea {
    #[serde(flatten)]
    pub assessment: RiskAssessment,

    /// Lower is more urgent
    pub priority_score: f64,

    /// 1-based position after sorting
    pub rank: usize,

    pub recommended_actions: Vec<String>,
}

impl PriorityArea {
    /// Drop the ranking and keep the underlying assessment
    pub fn into_assessment(self) -> RiskAssessment {
        self.assessment
    }
}
