// Unit tests for the viral metrics engine and its explanation.
//
// Tests isolated pure functions: evaluate_at score arithmetic and the viral
// gate at boundaries, ViralTier::from_score cutoffs, and explain() wording.

use chrono::{DateTime, Duration, TimeZone, Utc};

use viralscope::db::models::ViralTier;
use viralscope::scoring::reasons::explain;
use viralscope::scoring::viral::is_viral_at;
use viralscope::scoring::{
    default_thresholds, evaluate, evaluate_at, EngagementSample, Thresholds,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn sample(views: u64, likes: u64, comments: u64, days_old: i64) -> EngagementSample {
    EngagementSample {
        view_count: views,
        like_count: likes,
        comment_count: comments,
        published_at: now() - Duration::days(days_old),
    }
}

// ============================================================
// evaluate_at: reference cases
// ============================================================

#[test]
fn reference_sample_scores_87_and_is_viral() {
    let a = evaluate_at(&sample(200_000, 8_000, 1_200, 5), &default_thresholds(), now());
    // views min(30, 2*10)=20, likes 30, comments 20, age 20*(1-5/30)=16.67
    assert_eq!(a.score, 87);
    assert!(a.is_viral);
}

#[test]
fn below_min_views_gets_no_view_points_and_is_not_viral() {
    let a = evaluate_at(&sample(50_000, 2_000, 300, 5), &default_thresholds(), now());
    // likes 0.04 -> 30, comments 0.006 -> 20, age 16.67, views 0
    assert_eq!(a.score, 67);
    assert!(!a.is_viral);
}

#[test]
fn zero_views_yields_zero_ratios_and_not_viral() {
    let a = evaluate_at(&sample(0, 10, 10, 0), &default_thresholds(), now());
    assert_eq!(a.like_ratio_pct, 0.0);
    assert_eq!(a.comment_ratio_pct, 0.0);
    // Only the age term contributes
    assert_eq!(a.score, 20);
    assert!(!a.is_viral);
}

#[test]
fn all_four_gates_inclusive_at_exact_boundaries() {
    // 3_000/100_000 == 0.03 and 500/100_000 == 0.005 exactly in f64
    let a = evaluate_at(&sample(100_000, 3_000, 500, 30), &default_thresholds(), now());
    assert!(a.is_viral);
    // views exactly at threshold earns 10, not 30; age at max earns 0
    assert_eq!(a.score, 60);
}

#[test]
fn one_day_past_max_age_is_not_viral() {
    let a = evaluate_at(&sample(100_000, 3_000, 500, 31), &default_thresholds(), now());
    assert!(!a.is_viral);
    assert_eq!(a.score, 60);
}

#[test]
fn partial_credit_scores_without_viral_classification() {
    // like ratio 0.015 -> 15 of 30, comment ratio 0.0025 -> 10 of 20
    let a = evaluate_at(&sample(300_000, 4_500, 750, 0), &default_thresholds(), now());
    // views 30 + 15 + 10 + 20 = 75
    assert_eq!(a.score, 75);
    assert!(!a.is_viral);
}

#[test]
fn views_cap_reached_at_three_times_minimum() {
    let t = default_thresholds();
    let at_cap = evaluate_at(&sample(300_000, 0, 0, 100), &t, now());
    let far_above = evaluate_at(&sample(9_000_000, 0, 0, 100), &t, now());
    assert_eq!(at_cap.score, 30);
    assert_eq!(far_above.score, 30);
}

#[test]
fn score_rounds_half_up() {
    let t = Thresholds {
        min_views: 100,
        min_like_ratio: 0.1,
        min_comment_ratio: 0.1,
        max_age_days: 2,
    };
    // views 125/100*10 = 12.5, likes and comments full (30 + 20), age 2 of 2 = 0
    let a = evaluate_at(&sample(125, 13, 13, 2), &t, now());
    assert_eq!(a.score, 63);
}

#[test]
fn partial_ratio_credit_is_linear() {
    let t = Thresholds {
        min_views: 100,
        min_like_ratio: 0.1,
        min_comment_ratio: 0.1,
        max_age_days: 2,
    };
    // views 12.5, likes 6/125 = 0.048 -> 14.4, comments 0, age 1 of 2 -> 10
    let a = evaluate_at(&sample(125, 6, 0, 1), &t, now());
    assert_eq!(a.score, 37);
}

// ============================================================
// Division guards and degenerate thresholds
// ============================================================

#[test]
fn zero_ratio_thresholds_award_full_ratio_points() {
    let t = Thresholds {
        min_views: 1_000,
        min_like_ratio: 0.0,
        min_comment_ratio: 0.0,
        max_age_days: 10,
    };
    let a = evaluate_at(&sample(1_000, 0, 0, 10), &t, now());
    // views 10 + likes 30 + comments 20 + age 0
    assert_eq!(a.score, 60);
    assert!(a.is_viral);
}

#[test]
fn zero_age_window_only_rewards_same_day() {
    let t = Thresholds {
        max_age_days: 0,
        ..default_thresholds()
    };
    let same_day = evaluate_at(&sample(0, 0, 0, 0), &t, now());
    let next_day = evaluate_at(&sample(0, 0, 0, 1), &t, now());
    assert_eq!(same_day.score, 20);
    assert_eq!(next_day.score, 0);
}

#[test]
fn future_publication_is_clamped_to_100() {
    let s = sample(10_000_000, 1_000_000, 1_000_000, -10);
    let a = evaluate_at(&s, &default_thresholds(), now());
    assert_eq!(a.score, 100);
    assert_eq!(a.age_days, -10);
    assert!(a.is_viral);
}

#[test]
fn likes_exceeding_views_are_accepted() {
    let a = evaluate_at(&sample(100, 500, 0, 0), &default_thresholds(), now());
    assert!((a.like_ratio_pct - 500.0).abs() < 1e-9);
}

#[test]
fn score_always_within_bounds() {
    let thresholds = [
        default_thresholds(),
        Thresholds {
            min_views: 0,
            min_like_ratio: 0.0,
            min_comment_ratio: 0.0,
            max_age_days: 0,
        },
        Thresholds {
            min_views: u64::MAX,
            min_like_ratio: 1.0,
            min_comment_ratio: 1.0,
            max_age_days: u32::MAX,
        },
    ];
    let samples = [
        sample(0, 0, 0, 0),
        sample(u64::MAX, u64::MAX, u64::MAX, -1_000),
        sample(1, 1, 1, 100_000),
        sample(200_000, 8_000, 1_200, 5),
    ];
    for t in &thresholds {
        for s in &samples {
            let a = evaluate_at(s, t, now());
            assert!(a.score <= 100, "score {} out of range for {s:?}", a.score);
        }
    }
}

#[test]
fn more_views_never_lower_the_score() {
    let t = default_thresholds();
    let mut last = 0;
    for views in (0..=400_000u64).step_by(10_000) {
        let a = evaluate_at(&sample(views, 0, 0, 100), &t, now());
        assert!(a.score >= last, "score dropped at {views} views");
        last = a.score;
    }
}

#[test]
fn is_viral_at_agrees_with_evaluate_at() {
    let t = default_thresholds();
    for s in [
        sample(200_000, 8_000, 1_200, 5),
        sample(200_000, 1_000, 1_200, 5),
        sample(200_000, 8_000, 100, 5),
        sample(100_000, 3_000, 500, 30),
    ] {
        assert_eq!(is_viral_at(&s, &t, now()), evaluate_at(&s, &t, now()).is_viral);
    }
}

#[test]
fn evaluate_uses_the_wall_clock() {
    let s = EngagementSample {
        view_count: 200_000,
        like_count: 8_000,
        comment_count: 1_200,
        published_at: Utc::now() - Duration::days(5) - Duration::hours(1),
    };
    let a = evaluate(&s, &default_thresholds());
    assert_eq!(a.age_days, 5);
    assert_eq!(a.score, 87);
}

#[test]
fn default_thresholds_are_stable() {
    let a = default_thresholds();
    let b = default_thresholds();
    assert_eq!(a, b);
    assert_eq!(a.min_views, 100_000);
    assert_eq!(a.min_like_ratio, 0.03);
    assert_eq!(a.min_comment_ratio, 0.005);
    assert_eq!(a.max_age_days, 30);
}

// ============================================================
// ViralTier::from_score: boundary conditions
// ============================================================

#[test]
fn tier_boundaries() {
    assert_eq!(ViralTier::from_score(100), ViralTier::HighlyViral);
    assert_eq!(ViralTier::from_score(70), ViralTier::HighlyViral);
    assert_eq!(ViralTier::from_score(69), ViralTier::Viral);
    assert_eq!(ViralTier::from_score(50), ViralTier::Viral);
    assert_eq!(ViralTier::from_score(49), ViralTier::Moderate);
    assert_eq!(ViralTier::from_score(30), ViralTier::Moderate);
    assert_eq!(ViralTier::from_score(29), ViralTier::Low);
    assert_eq!(ViralTier::from_score(0), ViralTier::Low);
}

#[test]
fn tier_display_matches_as_str() {
    for tier in [
        ViralTier::Low,
        ViralTier::Moderate,
        ViralTier::Viral,
        ViralTier::HighlyViral,
    ] {
        assert_eq!(tier.to_string(), tier.as_str());
    }
    assert_eq!(ViralTier::Low.as_str(), "Low Engagement");
    assert_eq!(ViralTier::HighlyViral.as_str(), "Highly Viral");
}

// ============================================================
// explain: reasons for and against
// ============================================================

#[test]
fn explain_all_passing() {
    let t = default_thresholds();
    let s = sample(200_000, 8_000, 1_200, 5);
    let r = explain(&s, &evaluate_at(&s, &t, now()), &t);
    assert_eq!(
        r.reasons,
        vec![
            "200K views",
            "4.0% like ratio",
            "0.60% comment ratio",
            "Posted 5 days ago",
        ]
    );
    assert!(r.against.is_empty());
}

#[test]
fn explain_all_failing() {
    let t = default_thresholds();
    let s = sample(50_000, 1_000, 50, 45);
    let r = explain(&s, &evaluate_at(&s, &t, now()), &t);
    assert!(r.reasons.is_empty());
    assert_eq!(
        r.against,
        vec![
            "Only 50K views",
            "Low like ratio (2.0%)",
            "Low comment ratio (0.10%)",
            "Posted 45 days ago (not recent)",
        ]
    );
}

#[test]
fn explain_follows_custom_thresholds() {
    let t = Thresholds {
        min_views: 10_000,
        ..default_thresholds()
    };
    let s = sample(50_000, 1_000, 50, 5);
    let r = explain(&s, &evaluate_at(&s, &t, now()), &t);
    assert!(r.reasons.contains(&"50K views".to_string()));
}

#[test]
fn explain_reasons_agree_with_viral_gate() {
    let t = default_thresholds();
    for s in [
        sample(100_000, 3_000, 500, 30),
        sample(99_999, 3_000, 500, 30),
        sample(200_000, 8_000, 1_200, 5),
    ] {
        let a = evaluate_at(&s, &t, now());
        let r = explain(&s, &a, &t);
        assert_eq!(a.is_viral, r.against.is_empty(), "mismatch for {s:?}");
    }
}

#[test]
fn explain_rounds_half_thousands_up() {
    let t = default_thresholds();
    let s = sample(2_500, 0, 0, 5);
    let r = explain(&s, &evaluate_at(&s, &t, now()), &t);
    assert_eq!(r.against[0], "Only 3K views");
}
