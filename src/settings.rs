// Threshold settings: persisted in the settings table as JSON.
//
// Unset means "use the defaults"; resetting deletes the row rather than
// writing the default values, so a future change to the defaults reaches
// users who never customized them.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use crate::db::Database;
use crate::scoring::{default_thresholds, Thresholds};

pub const THRESHOLDS_KEY: &str = "viral_thresholds";

/// Load the active thresholds: stored values, or the defaults when unset.
pub async fn load_thresholds(db: &Arc<dyn Database>) -> Result<Thresholds> {
    match db.get_setting(THRESHOLDS_KEY).await? {
        Some(json) => serde_json::from_str(&json)
            .with_context(|| format!("Stored {THRESHOLDS_KEY} setting is not valid JSON: {json}")),
        None => {
            debug!("No stored thresholds, using defaults");
            Ok(default_thresholds())
        }
    }
}

/// Validate and store thresholds.
pub async fn save_thresholds(db: &Arc<dyn Database>, thresholds: &Thresholds) -> Result<()> {
    validate(thresholds)?;
    let json = serde_json::to_string(thresholds)?;
    db.set_setting(THRESHOLDS_KEY, &json).await
}

/// Forget stored thresholds. Returns whether any were stored.
pub async fn reset_thresholds(db: &Arc<dyn Database>) -> Result<bool> {
    db.delete_setting(THRESHOLDS_KEY).await
}

/// Ratios must be finite fractions in [0, 1].
pub fn validate(thresholds: &Thresholds) -> Result<()> {
    for (name, value) in [
        ("minimum like ratio", thresholds.min_like_ratio),
        ("minimum comment ratio", thresholds.min_comment_ratio),
    ] {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            anyhow::bail!(
                "Invalid {name}: {value}. Expected a fraction between 0 and 1 \
                 (a percentage between 0 and 100 on the command line)."
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;
    use crate::db::sqlite::SqliteDatabase;
    use rusqlite::Connection;

    fn test_db() -> Arc<dyn Database> {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        Arc::new(SqliteDatabase::new(conn))
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let db = test_db();
        assert_eq!(load_thresholds(&db).await.unwrap(), default_thresholds());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = test_db();
        let custom = Thresholds {
            min_views: 5_000,
            min_like_ratio: 0.05,
            min_comment_ratio: 0.01,
            max_age_days: 7,
        };
        save_thresholds(&db, &custom).await.unwrap();
        assert_eq!(load_thresholds(&db).await.unwrap(), custom);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let db = test_db();
        let custom = Thresholds {
            min_views: 1,
            ..default_thresholds()
        };
        save_thresholds(&db, &custom).await.unwrap();
        assert!(reset_thresholds(&db).await.unwrap());
        assert!(!reset_thresholds(&db).await.unwrap());
        assert_eq!(load_thresholds(&db).await.unwrap(), default_thresholds());
    }

    #[tokio::test]
    async fn test_invalid_ratio_is_not_saved() {
        let db = test_db();
        let bad = Thresholds {
            min_like_ratio: 3.0,
            ..default_thresholds()
        };
        assert!(save_thresholds(&db, &bad).await.is_err());
        assert_eq!(load_thresholds(&db).await.unwrap(), default_thresholds());
    }

    #[tokio::test]
    async fn test_corrupt_setting_is_an_error() {
        let db = test_db();
        db.set_setting(THRESHOLDS_KEY, "not json").await.unwrap();
        assert!(load_thresholds(&db).await.is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        let t = Thresholds {
            min_comment_ratio: f64::NAN,
            ..default_thresholds()
        };
        assert!(validate(&t).is_err());
    }
}
