// SqliteDatabase: rusqlite backend implementing the Database trait.
//
// The Connection is wrapped in tokio::sync::Mutex because Connection is !Sync.
// Trait methods lock the mutex, do synchronous rusqlite work, and return.
// The lock is never held across .await points.

use anyhow::Result;
use async_trait::async_trait;
use rusqlite::Connection;
use tokio::sync::Mutex;

use super::models::VideoAnalysis;
use super::traits::Database;

pub struct SqliteDatabase {
    conn: Mutex<Connection>,
}

impl SqliteDatabase {
    /// Wrap an already-opened rusqlite Connection.
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn table_count(&self) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::schema::table_count(&conn)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        super::queries::get_setting(&conn, key)
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        super::queries::set_setting(&conn, key, value)
    }

    async fn delete_setting(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().await;
        super::queries::delete_setting(&conn, key)
    }

    async fn insert_analysis(&self, analysis: &VideoAnalysis) -> Result<i64> {
        let conn = self.conn.lock().await;
        super::queries::insert_analysis(&conn, analysis)
    }

    async fn get_ranked_analyses(
        &self,
        min_score: u8,
        viral_only: bool,
    ) -> Result<Vec<VideoAnalysis>> {
        let conn = self.conn.lock().await;
        super::queries::get_ranked_analyses(&conn, min_score, viral_only)
    }

    async fn get_latest_analysis(&self, video_id: &str) -> Result<Option<VideoAnalysis>> {
        let conn = self.conn.lock().await;
        super::queries::get_latest_analysis(&conn, video_id)
    }

    async fn analysis_counts(&self) -> Result<(i64, i64)> {
        let conn = self.conn.lock().await;
        super::queries::analysis_counts(&conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::create_tables;

    async fn test_db() -> SqliteDatabase {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        SqliteDatabase::new(conn)
    }

    #[tokio::test]
    async fn test_trait_settings_roundtrip() {
        let db = test_db().await;
        assert_eq!(db.get_setting("theme").await.unwrap(), None);
        db.set_setting("theme", "dark").await.unwrap();
        assert_eq!(
            db.get_setting("theme").await.unwrap(),
            Some("dark".to_string())
        );
        assert!(db.delete_setting("theme").await.unwrap());
    }

    #[tokio::test]
    async fn test_trait_table_count() {
        let db = test_db().await;
        assert_eq!(db.table_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_trait_empty_database() {
        let db = test_db().await;
        assert!(db.get_ranked_analyses(0, false).await.unwrap().is_empty());
        assert!(db.get_latest_analysis("dQw4w9WgXcQ").await.unwrap().is_none());
        assert_eq!(db.analysis_counts().await.unwrap(), (0, 0));
    }
}
