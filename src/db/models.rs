// Data models: Rust structs that map to database rows.
//
// These are the types that flow through the application. They're separate
// from the database queries so other modules can use them without depending
// on rusqlite directly.

use serde::{Deserialize, Serialize};

use crate::scoring::Thresholds;

/// A stored viral analysis of one video.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoAnalysis {
    /// Row id (0 until inserted)
    pub id: i64,
    pub video_id: String,
    /// The URL or id the user passed in
    pub source_url: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    /// RFC 3339 publication timestamp
    pub published_at: String,
    /// Like ratio as a percentage
    pub like_ratio: f64,
    /// Comment ratio as a percentage
    pub comment_ratio: f64,
    pub viral_score: u8,
    pub is_viral: bool,
    /// Badge derived from `viral_score`; recomputed on read
    pub tier: ViralTier,
    pub analyzed_at: String,
    /// JSON-encoded thresholds the verdict was computed against
    pub thresholds_json: Option<String>,
}

impl VideoAnalysis {
    /// The thresholds this verdict was computed against, if they were recorded
    /// and still parse.
    pub fn scored_thresholds(&self) -> Option<Thresholds> {
        self.thresholds_json
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
    }
}

/// Badge buckets for the 0-100 viral score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViralTier {
    Low,
    Moderate,
    Viral,
    HighlyViral,
}

impl ViralTier {
    /// Determine the tier from a viral score (0-100).
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 70 => ViralTier::HighlyViral,
            s if s >= 50 => ViralTier::Viral,
            s if s >= 30 => ViralTier::Moderate,
            _ => ViralTier::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViralTier::Low => "Low Engagement",
            ViralTier::Moderate => "Moderate",
            ViralTier::Viral => "Viral",
            ViralTier::HighlyViral => "Highly Viral",
        }
    }
}

impl std::fmt::Display for ViralTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
