// Human-readable explanation of an assessment.
//
// One line per dimension, sorted into "for" and "against" depending on
// whether that dimension's raw gate passes. This mirrors the viral gate,
// not the score: a 40% partial-credit like ratio still lands in `against`.

use serde::Serialize;

use super::viral::{ratios, EngagementAssessment, EngagementSample, Thresholds};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViralReasons {
    pub reasons: Vec<String>,
    pub against: Vec<String>,
}

impl ViralReasons {
    fn push(&mut self, passed: bool, for_line: String, against_line: String) {
        if passed {
            self.reasons.push(for_line);
        } else {
            self.against.push(against_line);
        }
    }
}

/// Explain which of the four gates a sample passes.
pub fn explain(
    sample: &EngagementSample,
    assessment: &EngagementAssessment,
    thresholds: &Thresholds,
) -> ViralReasons {
    let mut out = ViralReasons::default();
    let (like_ratio, comment_ratio) = ratios(sample);

    let thousands = fixed(sample.view_count as f64 / 1000.0, 0);
    out.push(
        sample.view_count >= thresholds.min_views,
        format!("{thousands}K views"),
        format!("Only {thousands}K views"),
    );

    let like_pct = fixed(assessment.like_ratio_pct, 1);
    out.push(
        like_ratio >= thresholds.min_like_ratio,
        format!("{like_pct}% like ratio"),
        format!("Low like ratio ({like_pct}%)"),
    );

    let comment_pct = fixed(assessment.comment_ratio_pct, 2);
    out.push(
        comment_ratio >= thresholds.min_comment_ratio,
        format!("{comment_pct}% comment ratio"),
        format!("Low comment ratio ({comment_pct}%)"),
    );

    let days = assessment.age_days;
    out.push(
        days <= i64::from(thresholds.max_age_days),
        format!("Posted {days} days ago"),
        format!("Posted {days} days ago (not recent)"),
    );

    out
}

/// Format with `decimals` places, rounding ties away from zero.
/// Plain `{:.N}` formatting rounds exact ties to even ("2K" for 2500).
fn fixed(value: f64, decimals: usize) -> String {
    let scale = 10f64.powi(decimals as i32);
    format!("{:.*}", decimals, (value * scale).round() / scale)
}
