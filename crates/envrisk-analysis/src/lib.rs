//! envrisk Analysis - Risk scoring, prioritization and heatmap projection
//!
//! The pipeline is: score each location ([`scoring`], [`batch`]) → rank the
//! surviving assessments ([`prioritize`]) → project them for mapping
//! ([`heatmap`]). Every stage works on in-memory data and
//! never mutates its inputs.

pub mod batch;
pub mod demographics;
pub mod heatmap;
pub mod prioritize;
pub mod scoring;

pub use batch::{assess_batch, AssessmentFailure, BatchAssessment};
pub use demographics::{DemographicSource, DemographicTable};
pub use heatmap::{project_heatmap, project_heatmap_at};
pub use prioritize::{prioritize_areas, recommend_actions, AreaWeight, Prioritizer};
pub use scoring::{assess_location, categorize, CandidateSets};
