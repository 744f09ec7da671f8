// Colored terminal output for assessments, stored analyses and thresholds.
//
// This module handles all terminal-specific formatting: colors, tables,
// score bars. The main.rs command handlers delegate here.

use colored::Colorize;

use crate::db::models::{VideoAnalysis, ViralTier};
use crate::scoring::reasons::ViralReasons;
use crate::scoring::{EngagementAssessment, EngagementSample, Thresholds};
use crate::youtube::oembed::VideoMetadata;

/// Display one freshly computed assessment.
pub fn display_assessment(
    metadata: &VideoMetadata,
    sample: &EngagementSample,
    assessment: &EngagementAssessment,
    reasons: &ViralReasons,
) {
    let tier = ViralTier::from_score(assessment.score);

    println!(
        "\n{}",
        format!("=== {} ===", super::truncate_chars(&metadata.title, 70)).bold()
    );
    println!("  Channel: {}", metadata.channel_title);
    println!("  Video id: {}", metadata.video_id);
    println!("  Thumbnail: {}", metadata.thumbnail_url.dimmed());
    println!();

    println!(
        "  Views: {}  Likes: {}  Comments: {}",
        super::compact_count(sample.view_count),
        super::compact_count(sample.like_count),
        super::compact_count(sample.comment_count),
    );
    println!(
        "  Like ratio: {:.2}%  Comment ratio: {:.2}%  Age: {} days",
        assessment.like_ratio_pct, assessment.comment_ratio_pct, assessment.age_days
    );
    println!();

    println!(
        "  Viral score: {:>3}/100  {}  {}",
        assessment.score,
        score_bar(assessment.score),
        colorize_tier(tier)
    );
    if assessment.is_viral {
        println!("  {}", "This video meets viral criteria".green());
    } else {
        println!(
            "  {}",
            "This video doesn't meet all viral thresholds".dimmed()
        );
    }

    if !reasons.reasons.is_empty() {
        println!("\n  Why it could go viral:");
        for line in &reasons.reasons {
            println!("    {} {}", "+".green(), line);
        }
    }
    if !reasons.against.is_empty() {
        println!("\n  Holding it back:");
        for line in &reasons.against {
            println!("    {} {}", "-".red(), line);
        }
    }
}

/// Display stored analyses as a ranked table.
pub fn display_analysis_list(analyses: &[VideoAnalysis]) {
    if analyses.is_empty() {
        println!("No analyses match. Run `viralscope analyze <url>` first.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Viral Report ({} analyses) ===", analyses.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<11}  {:<36} {:>5}  {:<14} {:>7} {:>6} {:>6}",
        "Rank".dimmed(),
        "Video".dimmed(),
        "Title".dimmed(),
        "Score".dimmed(),
        "Tier".dimmed(),
        "Views".dimmed(),
        "Like%".dimmed(),
        "Viral".dimmed(),
    );
    println!("  {}", "-".repeat(100).dimmed());

    for (i, a) in analyses.iter().enumerate() {
        // Pad before coloring so ANSI codes don't break alignment
        let tier = format!("{:<14}", a.tier.as_str());
        let viral = if a.is_viral {
            format!("{:>6}", "yes").green()
        } else {
            format!("{:>6}", "no").dimmed()
        };
        println!(
            "  {:>4}. {:<11}  {:<36} {:>5}  {} {:>7} {:>6.2} {}",
            i + 1,
            a.video_id,
            super::truncate_chars(&a.title, 33),
            a.viral_score,
            colorize_tier_str(a.tier, &tier),
            super::compact_count(a.views),
            a.like_ratio,
            viral,
        );
    }

    println!();

    let viral_count = analyses.iter().filter(|a| a.is_viral).count();
    let highly = analyses
        .iter()
        .filter(|a| a.tier == ViralTier::HighlyViral)
        .count();
    if viral_count > 0 {
        println!("  {} {} meet all viral criteria", "!!".green().bold(), viral_count);
    }
    if highly > 0 {
        println!("  {} {} score Highly Viral", "+".green(), highly);
    }
}

/// Display the active thresholds, with ratios as percentages.
pub fn display_thresholds(thresholds: &Thresholds, customized: bool) {
    let source = if customized {
        "customized".yellow()
    } else {
        "defaults".dimmed()
    };
    println!("\n{} ({})", "Viral metrics thresholds".bold(), source);
    println!("  Minimum views:         {}", thresholds.min_views);
    println!(
        "  Minimum like ratio:    {}%",
        thresholds.min_like_ratio * 100.0
    );
    println!(
        "  Minimum comment ratio: {}%",
        thresholds.min_comment_ratio * 100.0
    );
    println!("  Maximum age:           {} days", thresholds.max_age_days);
}

/// A 20-cell bar for a 0-100 score.
pub fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(100)) / 5;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(20 - filled))
}

fn colorize_tier(tier: ViralTier) -> colored::ColoredString {
    colorize_tier_str(tier, tier.as_str())
}

/// Color a tier label (possibly pre-padded) by its tier.
fn colorize_tier_str(tier: ViralTier, label: &str) -> colored::ColoredString {
    match tier {
        ViralTier::HighlyViral => label.green().bold(),
        ViralTier::Viral => label.yellow().bold(),
        ViralTier::Moderate => label.bright_red(),
        ViralTier::Low => label.dimmed(),
    }
}
