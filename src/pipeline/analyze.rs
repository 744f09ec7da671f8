// Single-video analysis.
//
// Given metadata and caller-supplied counters, this module:
// 1. Evaluates the sample against the active thresholds
// 2. Explains the verdict per dimension
// 3. Builds the VideoAnalysis row ready for storage

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;

use crate::db::models::{VideoAnalysis, ViralTier};
use crate::scoring::reasons::{self, ViralReasons};
use crate::scoring::{evaluate_at, EngagementAssessment, EngagementSample, Thresholds};
use crate::youtube::oembed::VideoMetadata;

/// Everything one analysis produces.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub metadata: VideoMetadata,
    pub assessment: EngagementAssessment,
    pub tier: ViralTier,
    pub reasons: ViralReasons,
    #[serde(skip)]
    pub record: VideoAnalysis,
}

/// Score one video as of `now`.
pub fn analyze_video(
    source_url: &str,
    metadata: VideoMetadata,
    sample: &EngagementSample,
    thresholds: &Thresholds,
    now: DateTime<Utc>,
) -> AnalysisOutcome {
    let assessment = evaluate_at(sample, thresholds, now);
    let reasons = reasons::explain(sample, &assessment, thresholds);
    let tier = ViralTier::from_score(assessment.score);

    info!(
        video_id = %metadata.video_id,
        score = assessment.score,
        is_viral = assessment.is_viral,
        age_days = assessment.age_days,
        "Video analyzed"
    );

    let record = VideoAnalysis {
        id: 0,
        video_id: metadata.video_id.clone(),
        source_url: source_url.to_string(),
        title: metadata.title.clone(),
        channel_title: metadata.channel_title.clone(),
        thumbnail_url: metadata.thumbnail_url.clone(),
        views: sample.view_count,
        likes: sample.like_count,
        comments: sample.comment_count,
        published_at: sample
            .published_at
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        like_ratio: assessment.like_ratio_pct,
        comment_ratio: assessment.comment_ratio_pct,
        viral_score: assessment.score,
        is_viral: assessment.is_viral,
        tier,
        analyzed_at: String::new(),
        // Thresholds are plain numbers; serializing them cannot fail
        thresholds_json: serde_json::to_string(thresholds).ok(),
    };

    AnalysisOutcome {
        metadata,
        assessment,
        tier,
        reasons,
        record,
    }
}
