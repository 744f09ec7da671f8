use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::Arc;
use tracing::{info, warn};

use viralscope::db::Database;
use viralscope::scoring::{EngagementSample, Thresholds};
use viralscope::youtube::oembed::{OEmbedClient, VideoMetadata};

mod config;

/// viralscope: viral-worthiness scoring for short-form video.
///
/// Scores a video's engagement against configurable thresholds and tells
/// you whether it meets every viral criterion.
#[derive(Parser)]
#[command(name = "viralscope", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the database
    Init,

    /// Score a video's engagement
    Analyze {
        /// YouTube URL (watch, youtu.be or shorts) or bare 11-character video id
        video: String,

        /// View count
        #[arg(long)]
        views: u64,

        /// Like count
        #[arg(long)]
        likes: u64,

        /// Comment count
        #[arg(long)]
        comments: u64,

        /// Days since the video was published
        #[arg(long, conflicts_with = "published_at", required_unless_present = "published_at")]
        days_old: Option<u32>,

        /// Publication time as RFC 3339 (e.g. 2025-05-27T12:00:00Z)
        #[arg(long)]
        published_at: Option<String>,

        /// Skip the oEmbed title/channel lookup
        #[arg(long)]
        offline: bool,

        /// Don't store the analysis
        #[arg(long)]
        no_save: bool,

        /// Print the result as JSON instead of a formatted card
        #[arg(long)]
        json: bool,
    },

    /// Show, change or reset the viral thresholds
    Thresholds {
        #[command(subcommand)]
        action: ThresholdsAction,
    },

    /// List stored analyses ranked by score
    Report {
        /// Only include analyses at or above this score
        #[arg(long, default_value = "0")]
        min_score: u8,

        /// Only include analyses that met every viral criterion
        #[arg(long)]
        viral_only: bool,

        /// Also write a markdown report to this path
        #[arg(long)]
        output: Option<String>,
    },

    /// Show system status (DB stats, active thresholds)
    Status,
}

#[derive(Subcommand)]
enum ThresholdsAction {
    /// Print the active thresholds
    Show,

    /// Change one or more thresholds (unspecified values are kept)
    Set {
        /// Minimum view count
        #[arg(long)]
        min_views: Option<u64>,

        /// Minimum like ratio, as a percentage (3 = 3%)
        #[arg(long)]
        min_like_pct: Option<f64>,

        /// Minimum comment ratio, as a percentage (0.5 = 0.5%)
        #[arg(long)]
        min_comment_pct: Option<f64>,

        /// Maximum age in days
        #[arg(long)]
        max_days_old: Option<u32>,
    },

    /// Forget customized thresholds and go back to the defaults
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging. Logs go to stderr so `analyze --json`
    // output stays parseable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("viralscope=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            info!("Initializing viralscope database...");
            let config = config::Config::load()?;
            let db = viralscope::db::initialize_sqlite(&config.db_path)?;
            let table_count = db.table_count().await?;
            println!("Database initialized at: {}", config.db_path);
            println!("Tables created: {table_count}");
            println!("\nviralscope is ready. Try:");
            println!("  viralscope analyze <youtube-url> --views 200000 --likes 8000 --comments 1200 --days-old 5");
        }

        Commands::Analyze {
            video,
            views,
            likes,
            comments,
            days_old,
            published_at,
            offline,
            no_save,
            json,
        } => {
            let config = config::Config::load()?;

            let video_id = viralscope::youtube::extract_video_id(&video).with_context(|| {
                format!(
                    "Could not find a YouTube video id in {video:?}.\n\
                     Pass a watch, youtu.be or shorts URL, or the 11-character id."
                )
            })?;

            let now = Utc::now();
            let published_at = resolve_published_at(days_old, published_at.as_deref(), now)?;

            // Thresholds live in the database. Without one, --no-save can
            // still score against the defaults.
            let db = if viralscope::status::database_exists(&config.db_path) {
                Some(viralscope::db::open_sqlite(&config.db_path)?)
            } else if no_save {
                info!("No database found, scoring against default thresholds");
                None
            } else {
                // Produces the "run init first" error
                Some(viralscope::db::open_sqlite(&config.db_path)?)
            };

            let thresholds = match &db {
                Some(db) => viralscope::settings::load_thresholds(db).await?,
                None => viralscope::scoring::default_thresholds(),
            };

            let metadata = if offline {
                VideoMetadata::placeholder(&video_id)
            } else {
                fetch_metadata_or_placeholder(&config.oembed_url, &video_id, &mut std::io::stderr())
                    .await
            };

            let sample = EngagementSample {
                view_count: views,
                like_count: likes,
                comment_count: comments,
                published_at,
            };

            let outcome = viralscope::pipeline::analyze::analyze_video(
                &video, metadata, &sample, &thresholds, now,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                viralscope::output::terminal::display_assessment(
                    &outcome.metadata,
                    &sample,
                    &outcome.assessment,
                    &outcome.reasons,
                );
            }

            if let Some(db) = db.filter(|_| !no_save) {
                let previous = db.get_latest_analysis(&video_id).await?;
                let id = db.insert_analysis(&outcome.record).await?;
                if !json {
                    if let Some(prev) = previous {
                        println!(
                            "\n  {}",
                            format!(
                                "Previously scored {}/100 on {}",
                                prev.viral_score, prev.analyzed_at
                            )
                            .dimmed()
                        );
                    }
                    println!("\n{}", format!("Saved as analysis #{id}.").bold());
                }
            }
        }

        Commands::Thresholds { action } => {
            let config = config::Config::load()?;
            let db = viralscope::db::open_sqlite(&config.db_path)?;

            match action {
                ThresholdsAction::Show => {
                    show_thresholds(&db).await?;
                }

                ThresholdsAction::Set {
                    min_views,
                    min_like_pct,
                    min_comment_pct,
                    max_days_old,
                } => {
                    if min_views.is_none()
                        && min_like_pct.is_none()
                        && min_comment_pct.is_none()
                        && max_days_old.is_none()
                    {
                        anyhow::bail!(
                            "Nothing to change. Pass at least one of --min-views, \
                             --min-like-pct, --min-comment-pct, --max-days-old."
                        );
                    }

                    let current = viralscope::settings::load_thresholds(&db).await?;
                    let updated = Thresholds {
                        min_views: min_views.unwrap_or(current.min_views),
                        min_like_ratio: min_like_pct
                            .map(|p| p / 100.0)
                            .unwrap_or(current.min_like_ratio),
                        min_comment_ratio: min_comment_pct
                            .map(|p| p / 100.0)
                            .unwrap_or(current.min_comment_ratio),
                        max_age_days: max_days_old.unwrap_or(current.max_age_days),
                    };

                    viralscope::settings::save_thresholds(&db, &updated).await?;
                    info!(?updated, "Thresholds saved");
                    println!("{}", "Thresholds saved.".bold());
                    show_thresholds(&db).await?;
                }

                ThresholdsAction::Reset => {
                    if viralscope::settings::reset_thresholds(&db).await? {
                        println!("{}", "Thresholds reset to defaults.".bold());
                    } else {
                        println!("Thresholds were already the defaults.");
                    }
                    show_thresholds(&db).await?;
                }
            }
        }

        Commands::Report {
            min_score,
            viral_only,
            output,
        } => {
            let config = config::Config::load()?;
            let db = viralscope::db::open_sqlite(&config.db_path)?;

            let analyses = db.get_ranked_analyses(min_score, viral_only).await?;
            viralscope::output::terminal::display_analysis_list(&analyses);

            if let Some(path) = output {
                let thresholds = viralscope::settings::load_thresholds(&db).await?;
                let report_path =
                    viralscope::output::markdown::generate_report(&analyses, &thresholds, &path)?;
                println!(
                    "\n{}",
                    format!("Markdown report saved to: {report_path}").bold()
                );
            }
        }

        Commands::Status => {
            let config = config::Config::load()?;
            if !viralscope::status::database_exists(&config.db_path) {
                println!("Database: not initialized");
                println!("\nRun `viralscope init` to set up the database.");
                return Ok(());
            }
            let db = viralscope::db::open_sqlite(&config.db_path)?;
            viralscope::status::show(&db, &config.db_path).await?;
        }
    }

    Ok(())
}

/// Work out the publication time from either --days-old or --published-at.
fn resolve_published_at(
    days_old: Option<u32>,
    published_at: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>> {
    match (days_old, published_at) {
        (_, Some(ts)) => {
            let parsed = DateTime::parse_from_rfc3339(ts)
                .with_context(|| format!("--published-at {ts:?} is not an RFC 3339 timestamp"))?;
            let parsed = parsed.with_timezone(&Utc);
            if parsed > now {
                warn!(published_at = %parsed, "Publication time is in the future");
            }
            Ok(parsed)
        }
        (Some(days), None) => now
            .checked_sub_signed(Duration::days(i64::from(days)))
            .with_context(|| format!("--days-old {days} reaches before the earliest supported date")),
        // clap enforces one of the two
        (None, None) => anyhow::bail!("Pass --days-old or --published-at"),
    }
}

/// Look up oEmbed metadata, falling back to placeholders on any failure.
/// The score never depends on it, so a lookup failure is only a warning,
/// written to `notices` rather than stdout.
async fn fetch_metadata_or_placeholder(
    oembed_url: &str,
    video_id: &str,
    notices: &mut impl Write,
) -> VideoMetadata {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Looking up {video_id}..."));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = match OEmbedClient::new(oembed_url) {
        Ok(client) => client.fetch_metadata(video_id).await,
        Err(e) => Err(e),
    };
    spinner.finish_and_clear();

    match result {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(error = %e, video_id, "oEmbed lookup failed");
            // A notice that can't be written has nowhere else to go
            let _ = writeln!(
                notices,
                "  {} metadata lookup failed ({e}); continuing without a title",
                "Warning:".yellow()
            );
            VideoMetadata::placeholder(video_id)
        }
    }
}

/// Print the active thresholds, noting whether they were customized.
async fn show_thresholds(db: &Arc<dyn Database>) -> Result<()> {
    let customized = db
        .get_setting(viralscope::settings::THRESHOLDS_KEY)
        .await?
        .is_some();
    let thresholds = viralscope::settings::load_thresholds(db).await?;
    viralscope::output::terminal::display_thresholds(&thresholds, customized);
    Ok(())
}
