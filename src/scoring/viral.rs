// Viral metrics engine: the score and the viral gate.
//
// Four dimensions (views, like ratio, comment ratio, age) feed two
// independent outputs: a weighted 0-100 score with partial credit, and a
// hard AND over the raw threshold comparisons. A sample can score well and
// still not be viral; the classification never looks at the score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MS_PER_DAY: i64 = 86_400_000;

const VIEWS_MAX: f64 = 30.0;
const LIKES_MAX: f64 = 30.0;
const COMMENTS_MAX: f64 = 20.0;
const AGE_MAX: f64 = 20.0;

/// One content item's observed stats at evaluation time.
///
/// Counts are taken as given: `like_count > view_count` is not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngagementSample {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub published_at: DateTime<Utc>,
}

/// Cutoffs that define "high-performing" content.
///
/// Ratios are fractions (0.03 = 3%), not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub min_views: u64,
    pub min_like_ratio: f64,
    pub min_comment_ratio: f64,
    pub max_age_days: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_views: 100_000,
            min_like_ratio: 0.03,
            min_comment_ratio: 0.005,
            max_age_days: 30,
        }
    }
}

/// The well-known default thresholds.
pub fn default_thresholds() -> Thresholds {
    Thresholds::default()
}

/// Result of evaluating one sample. Computed fresh on every call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngagementAssessment {
    /// likes / views * 100 (0 when there are no views)
    pub like_ratio_pct: f64,
    /// comments / views * 100 (0 when there are no views)
    pub comment_ratio_pct: f64,
    /// Whole days since publication, floored. Negative for future timestamps.
    pub age_days: i64,
    /// Weighted score, 0-100
    pub score: u8,
    pub is_viral: bool,
}

/// Evaluate a sample against thresholds using the current wall clock.
pub fn evaluate(sample: &EngagementSample, thresholds: &Thresholds) -> EngagementAssessment {
    evaluate_at(sample, thresholds, Utc::now())
}

/// Evaluate a sample against thresholds as of `now`.
pub fn evaluate_at(
    sample: &EngagementSample,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> EngagementAssessment {
    let age_days = age_in_days(sample.published_at, now);
    let (like_ratio, comment_ratio) = ratios(sample);

    let total = views_term(sample.view_count, thresholds.min_views)
        + ratio_term(like_ratio, thresholds.min_like_ratio, LIKES_MAX)
        + ratio_term(comment_ratio, thresholds.min_comment_ratio, COMMENTS_MAX)
        + age_term(age_days, thresholds.max_age_days);

    // NaN (only reachable through NaN thresholds) saturates to 0 in the cast
    let score = total.clamp(0.0, 100.0).round() as u8;

    EngagementAssessment {
        like_ratio_pct: like_ratio * 100.0,
        comment_ratio_pct: comment_ratio * 100.0,
        age_days,
        score,
        is_viral: passes_all_gates(sample, thresholds, like_ratio, comment_ratio, age_days),
    }
}

/// The viral classification on its own, as of `now`.
pub fn is_viral_at(sample: &EngagementSample, thresholds: &Thresholds, now: DateTime<Utc>) -> bool {
    let (like_ratio, comment_ratio) = ratios(sample);
    let age_days = age_in_days(sample.published_at, now);
    passes_all_gates(sample, thresholds, like_ratio, comment_ratio, age_days)
}

/// Whole days between `published_at` and `now`, floored toward negative infinity.
pub fn age_in_days(published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published_at).num_milliseconds().div_euclid(MS_PER_DAY)
}

/// Raw (like, comment) ratios as fractions; both 0 when there are no views.
pub(crate) fn ratios(sample: &EngagementSample) -> (f64, f64) {
    if sample.view_count == 0 {
        return (0.0, 0.0);
    }
    let views = sample.view_count as f64;
    (
        sample.like_count as f64 / views,
        sample.comment_count as f64 / views,
    )
}

fn passes_all_gates(
    sample: &EngagementSample,
    thresholds: &Thresholds,
    like_ratio: f64,
    comment_ratio: f64,
    age_days: i64,
) -> bool {
    sample.view_count >= thresholds.min_views
        && like_ratio >= thresholds.min_like_ratio
        && comment_ratio >= thresholds.min_comment_ratio
        && age_days <= i64::from(thresholds.max_age_days)
}

/// No credit below the threshold; above it, 10 points per multiple of
/// `min_views`, capped at 30. Exactly at threshold earns 10.
fn views_term(views: u64, min_views: u64) -> f64 {
    if views < min_views {
        return 0.0;
    }
    if min_views == 0 {
        return VIEWS_MAX;
    }
    (views as f64 / min_views as f64 * 10.0).min(VIEWS_MAX)
}

/// Full credit at or above the minimum, linear partial credit below it.
fn ratio_term(ratio: f64, min_ratio: f64, max_points: f64) -> f64 {
    if min_ratio <= 0.0 || ratio >= min_ratio {
        max_points
    } else {
        ratio / min_ratio * max_points
    }
}

/// Linear decay from 20 at age 0 to 0 at `max_age_days`.
fn age_term(age_days: i64, max_age_days: u32) -> f64 {
    let max_age = i64::from(max_age_days);
    if age_days > max_age {
        return 0.0;
    }
    if max_age == 0 {
        return if age_days == 0 { AGE_MAX } else { 0.0 };
    }
    AGE_MAX * (1.0 - age_days as f64 / max_age as f64)
}
