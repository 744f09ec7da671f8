// Database trait: backend-agnostic async interface for all DB operations.
//
// Implementors: SqliteDatabase (wraps rusqlite). Methods are async so a
// sync connection behind a Mutex and a natively async backend both fit
// behind a single interface.
//
// The trait mirrors the queries.rs function signatures.

use anyhow::Result;
use async_trait::async_trait;

use super::models::VideoAnalysis;

#[async_trait]
pub trait Database: Send + Sync {
    // --- Lifecycle ---

    /// Count the number of user-created tables in the database.
    async fn table_count(&self) -> Result<i64>;

    // --- Settings ---

    /// Get a setting value by key.
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;

    /// Set a setting value (upsert).
    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a setting. Returns whether it existed.
    async fn delete_setting(&self, key: &str) -> Result<bool>;

    // --- Video analyses ---

    /// Record an analysis and return its row id.
    async fn insert_analysis(&self, analysis: &VideoAnalysis) -> Result<i64>;

    /// Analyses at or above `min_score`, ranked by score descending.
    async fn get_ranked_analyses(&self, min_score: u8, viral_only: bool)
        -> Result<Vec<VideoAnalysis>>;

    /// Most recent analysis of a video.
    async fn get_latest_analysis(&self, video_id: &str) -> Result<Option<VideoAnalysis>>;

    /// (total, viral) analysis counts.
    async fn analysis_counts(&self) -> Result<(i64, i64)>;
}
