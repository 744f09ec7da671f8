use std::env;

use anyhow::Result;

use viralscope::youtube::oembed::DEFAULT_OEMBED_URL;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
/// Thresholds are not configured here; they live in the database and are
/// edited with `viralscope thresholds set`.
pub struct Config {
    /// SQLite database file (VIRALSCOPE_DB_PATH, defaults to ./viralscope.db)
    pub db_path: String,
    /// oEmbed host used for title/channel lookups (OEMBED_URL)
    pub oembed_url: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let oembed_url = env::var("OEMBED_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OEMBED_URL.to_string());

        if !oembed_url.starts_with("http://") && !oembed_url.starts_with("https://") {
            anyhow::bail!(
                "OEMBED_URL must be an http(s) URL, got: {oembed_url}\n\
                 Unset it to use {DEFAULT_OEMBED_URL}."
            );
        }

        Ok(Self {
            db_path: env::var("VIRALSCOPE_DB_PATH")
                .unwrap_or_else(|_| "./viralscope.db".to_string()),
            oembed_url,
        })
    }
}
