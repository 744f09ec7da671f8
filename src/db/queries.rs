// Database queries: CRUD operations for all tables.
//
// Every database interaction goes through this module. This keeps SQL
// contained in one place and gives the rest of the app clean Rust interfaces.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::models::{VideoAnalysis, ViralTier};

// --- Settings ---

/// Get a setting value by key (e.g., "viral_thresholds").
pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
    let result = stmt.query_row(params![key], |row| row.get(0)).optional()?;
    Ok(result)
}

/// Set a setting value (upsert).
pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings (key, value, updated_at)
         VALUES (?1, ?2, datetime('now'))
         ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

/// Remove a setting. Returns whether a row was deleted.
pub fn delete_setting(conn: &Connection, key: &str) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
    Ok(deleted > 0)
}

// --- Video analyses ---

/// SQLite integers are signed; counts above i64::MAX can't be stored.
fn count_to_sql(value: u64, field: &str) -> Result<i64> {
    i64::try_from(value).with_context(|| format!("{field} count {value} is too large to store"))
}

/// Record an analysis and return its row id.
pub fn insert_analysis(conn: &Connection, analysis: &VideoAnalysis) -> Result<i64> {
    conn.execute(
        "INSERT INTO video_analyses
            (video_id, source_url, title, channel_title, thumbnail_url, views, likes, comments,
             published_at, like_ratio, comment_ratio, viral_score, is_viral, analyzed_at,
             thresholds_json)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, datetime('now'), ?14)",
        params![
            analysis.video_id,
            analysis.source_url,
            analysis.title,
            analysis.channel_title,
            analysis.thumbnail_url,
            count_to_sql(analysis.views, "view")?,
            count_to_sql(analysis.likes, "like")?,
            count_to_sql(analysis.comments, "comment")?,
            analysis.published_at,
            analysis.like_ratio,
            analysis.comment_ratio,
            analysis.viral_score,
            analysis.is_viral,
            analysis.thresholds_json,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

const ANALYSIS_COLUMNS: &str = "id, video_id, source_url, title, channel_title, thumbnail_url,
     views, likes, comments, published_at, like_ratio, comment_ratio, viral_score, is_viral,
     analyzed_at, thresholds_json";

fn analysis_from_row(row: &Row<'_>) -> rusqlite::Result<VideoAnalysis> {
    // Recalculate tier from stored score so badge cutoff changes
    // take effect without re-analyzing.
    let viral_score: u8 = row.get(12)?;
    Ok(VideoAnalysis {
        id: row.get(0)?,
        video_id: row.get(1)?,
        source_url: row.get(2)?,
        title: row.get(3)?,
        channel_title: row.get(4)?,
        thumbnail_url: row.get(5)?,
        views: row.get::<_, i64>(6)?.max(0) as u64,
        likes: row.get::<_, i64>(7)?.max(0) as u64,
        comments: row.get::<_, i64>(8)?.max(0) as u64,
        published_at: row.get(9)?,
        like_ratio: row.get(10)?,
        comment_ratio: row.get(11)?,
        viral_score,
        is_viral: row.get::<_, i32>(13)? != 0,
        tier: ViralTier::from_score(viral_score),
        analyzed_at: row.get(14)?,
        thresholds_json: row.get(15)?,
    })
}

/// Get analyses at or above a minimum score, ranked by score descending.
/// Ties go to the most recent analysis.
pub fn get_ranked_analyses(
    conn: &Connection,
    min_score: u8,
    viral_only: bool,
) -> Result<Vec<VideoAnalysis>> {
    let sql = format!(
        "SELECT {ANALYSIS_COLUMNS}
         FROM video_analyses
         WHERE viral_score >= ?1 AND (?2 = 0 OR is_viral = 1)
         ORDER BY viral_score DESC, id DESC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![min_score, viral_only], analysis_from_row)?;

    let mut analyses = Vec::new();
    for row in rows {
        analyses.push(row?);
    }
    Ok(analyses)
}

/// Get the most recent analysis of a video, if it has been analyzed before.
pub fn get_latest_analysis(conn: &Connection, video_id: &str) -> Result<Option<VideoAnalysis>> {
    let sql = format!(
        "SELECT {ANALYSIS_COLUMNS}
         FROM video_analyses
         WHERE video_id = ?1
         ORDER BY id DESC
         LIMIT 1"
    );
    let mut stmt = conn.prepare(&sql)?;
    let result = stmt
        .query_row(params![video_id], analysis_from_row)
        .optional()?;
    Ok(result)
}

/// Count stored analyses. Returns (total, viral).
pub fn analysis_counts(conn: &Connection) -> Result<(i64, i64)> {
    let counts = conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(is_viral), 0) FROM video_analyses",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    Ok(counts)
}
