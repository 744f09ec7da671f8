// YouTube oEmbed client: title, channel and thumbnail for a video id.
//
// oEmbed is public and unauthenticated but carries no engagement counters;
// those come from the caller.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default oEmbed host.
pub const DEFAULT_OEMBED_URL: &str = "https://www.youtube.com";

/// Descriptive metadata for one video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
}

impl VideoMetadata {
    /// Placeholder metadata used when no lookup is possible.
    pub fn placeholder(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            title: "Unknown Title".to_string(),
            channel_title: "Unknown Channel".to_string(),
            thumbnail_url: default_thumbnail_url(video_id),
        }
    }
}

pub fn default_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{video_id}/maxresdefault.jpg")
}

/// Raw oEmbed response. Every field is optional in practice.
#[derive(Debug, Deserialize)]
struct OEmbedResponse {
    title: Option<String>,
    author_name: Option<String>,
    thumbnail_url: Option<String>,
}

impl OEmbedResponse {
    fn into_metadata(self, video_id: &str) -> VideoMetadata {
        let fallback = VideoMetadata::placeholder(video_id);
        VideoMetadata {
            video_id: video_id.to_string(),
            title: non_empty(self.title).unwrap_or(fallback.title),
            channel_title: non_empty(self.author_name).unwrap_or(fallback.channel_title),
            thumbnail_url: non_empty(self.thumbnail_url).unwrap_or(fallback.thumbnail_url),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Thin reqwest wrapper around the oEmbed endpoint.
pub struct OEmbedClient {
    client: reqwest::Client,
    base_url: String,
}

impl OEmbedClient {
    /// Create a client pointing at the given base URL
    /// (normally [`DEFAULT_OEMBED_URL`]).
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("viralscope/0.1")
            .timeout(std::time::Duration::from_secs(15))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Look up a video's metadata.
    pub async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata> {
        let url = format!("{}/oembed", self.base_url);
        let watch_url = format!("https://www.youtube.com/watch?v={video_id}");

        debug!(video_id, "oEmbed lookup");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("url", watch_url.as_str()), ("format", "json")])
            .send()
            .await
            .with_context(|| format!("oEmbed request failed for {video_id}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Video not found or not accessible ({status}): {video_id}");
        }

        let body: OEmbedResponse = response
            .json()
            .await
            .context("Failed to parse oEmbed response")?;

        Ok(body.into_metadata(video_id))
    }
}
