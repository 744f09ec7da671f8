// Scoring: the viral metrics engine and its explanation.

pub mod reasons;
pub mod viral;

pub use viral::{
    default_thresholds, evaluate, evaluate_at, EngagementAssessment, EngagementSample, Thresholds,
};
