// Markdown report: a shareable snapshot of stored analyses.

use std::fmt::{self, Write as _};
use std::path::Path;

use anyhow::{Context, Result};

use crate::db::models::VideoAnalysis;
use crate::scoring::Thresholds;

/// Render the report body.
pub fn render_report(analyses: &[VideoAnalysis], thresholds: &Thresholds) -> String {
    let mut md = String::new();
    // fmt::Write for String never returns an error
    write_report(&mut md, analyses, thresholds)
        .map(|_| md)
        .unwrap_or_default()
}

fn write_report(
    md: &mut String,
    analyses: &[VideoAnalysis],
    thresholds: &Thresholds,
) -> fmt::Result {
    writeln!(md, "# Viral Report\n")?;
    writeln!(
        md,
        "Generated {}.\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M UTC")
    )?;

    writeln!(md, "## Thresholds\n")?;
    write_thresholds(md, thresholds)?;
    writeln!(md)?;

    let viral = analyses.iter().filter(|a| a.is_viral).count();
    writeln!(
        md,
        "## Analyses ({} total, {} viral)\n",
        analyses.len(),
        viral
    )?;

    if analyses.is_empty() {
        return writeln!(md, "_No analyses recorded._");
    }

    writeln!(
        md,
        "| # | Video | Title | Channel | Score | Tier | Views | Like % | Comment % | Viral |"
    )?;
    writeln!(md, "|---|---|---|---|---|---|---|---|---|---|")?;
    for (i, a) in analyses.iter().enumerate() {
        writeln!(
            md,
            "| {} | [{}](https://youtu.be/{}) | {} | {} | {} | {} | {} | {:.2} | {:.2} | {} |",
            i + 1,
            a.video_id,
            a.video_id,
            escape_cell(&super::truncate_chars(&a.title, 60)),
            escape_cell(&a.channel_title),
            a.viral_score,
            a.tier,
            super::compact_count(a.views),
            a.like_ratio,
            a.comment_ratio,
            if a.is_viral { "yes" } else { "no" },
        )?;
    }

    // Verdicts stored under thresholds that have since been edited
    let stale: Vec<(usize, &VideoAnalysis, Thresholds)> = analyses
        .iter()
        .enumerate()
        .filter_map(|(i, a)| {
            a.scored_thresholds()
                .filter(|t| t != thresholds)
                .map(|t| (i + 1, a, t))
        })
        .collect();

    if !stale.is_empty() {
        writeln!(md, "\n## Scored Under Other Thresholds\n")?;
        for (rank, a, t) in stale {
            writeln!(md, "### #{rank} {}\n", a.video_id)?;
            write_thresholds(md, &t)?;
            writeln!(md)?;
        }
    }

    Ok(())
}

fn write_thresholds(md: &mut String, t: &Thresholds) -> fmt::Result {
    writeln!(md, "- Minimum views: {}", t.min_views)?;
    writeln!(md, "- Minimum like ratio: {}%", t.min_like_ratio * 100.0)?;
    writeln!(md, "- Minimum comment ratio: {}%", t.min_comment_ratio * 100.0)?;
    writeln!(md, "- Maximum age: {} days", t.max_age_days)
}

/// Write the report to `path`, creating parent directories. Returns the path.
pub fn generate_report(
    analyses: &[VideoAnalysis],
    thresholds: &Thresholds,
    path: &str,
) -> Result<String> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory for {path}"))?;
        }
    }
    std::fs::write(path, render_report(analyses, thresholds))
        .with_context(|| format!("Failed to write report to {path}"))?;
    Ok(path.to_string())
}

/// Pipes would split a table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
