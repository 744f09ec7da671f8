// System status display: database size, analysis counts, active thresholds.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::db::Database;
use crate::settings;

/// Display system status to the terminal.
pub async fn show(db: &Arc<dyn Database>, db_path: &str) -> Result<()> {
    let file_size = std::fs::metadata(db_path)
        .map(|m| format_bytes(m.len()))
        .unwrap_or_else(|_| "unknown".to_string());
    println!("Database: {} ({})", db_path, file_size);

    let (total, viral) = db.analysis_counts().await?;
    if total == 0 {
        println!("Analyses: none yet");
        println!("  Run `viralscope analyze <url>` to score a video");
    } else {
        println!("Analyses: {} total, {} viral", total, viral);
    }

    if let Some(top) = db.get_ranked_analyses(0, false).await?.first() {
        println!(
            "Top score: {}/100 ({}) for {}",
            top.viral_score, top.tier, top.video_id
        );
    }

    let customized = db.get_setting(settings::THRESHOLDS_KEY).await?.is_some();
    let thresholds = settings::load_thresholds(db).await?;
    crate::output::terminal::display_thresholds(&thresholds, customized);

    Ok(())
}

/// True when the database file exists at all.
pub fn database_exists(db_path: &str) -> bool {
    Path::new(db_path).exists()
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
