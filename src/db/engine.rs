//! Database engine and connection management

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

/// Database engine wrapper
#[derive(Debug, Clone)]
pub struct DbEngine {
    pool: SqlitePool,
}

impl DbEngine {
    /// Open (or create) the database file and make sure the tables exist
    pub async fn connect(db_path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(30))
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to connect to database {}", db_path.display()))?;

        let engine = Self { pool };
        engine.create_tables().await?;
        Ok(engine)
    }

    /// A private in-memory database. Every connection to `:memory:` is a
    /// separate database, so the pool holds exactly one and never recycles it.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .context("Failed to open in-memory database")?;

        let engine = Self { pool };
        engine.create_tables().await?;
        Ok(engine)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn create_tables(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS track (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                album TEXT NOT NULL,
                albumartists TEXT NOT NULL,
                albumhash TEXT NOT NULL,
                artists TEXT NOT NULL,
                bitrate INTEGER NOT NULL DEFAULT 0,
                date INTEGER,
                disc INTEGER NOT NULL DEFAULT 1,
                duration INTEGER NOT NULL DEFAULT 0,
                filepath TEXT NOT NULL UNIQUE,
                folder TEXT NOT NULL,
                title TEXT NOT NULL,
                track INTEGER NOT NULL DEFAULT 0,
                trackhash TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_track_albumhash ON track(albumhash);
            CREATE INDEX IF NOT EXISTS idx_track_trackhash ON track(trackhash);
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create track table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS favorite (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                hash TEXT NOT NULL,
                type TEXT NOT NULL,
                timestamp INTEGER NOT NULL,
                UNIQUE (hash, type)
            );
            CREATE INDEX IF NOT EXISTS idx_favorite_type ON favorite(type);
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create favorite table")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_connect_creates_file_and_tables() {
        let temp = TempDir::new().unwrap();
        let db_path = temp.path().join("library.db");

        let engine = DbEngine::connect(&db_path).await.unwrap();
        assert!(db_path.exists());

        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('track', 'favorite')",
        )
        .fetch_one(engine.pool())
        .await
        .unwrap();
        assert_eq!(count, 2);

        // reopening an existing database is fine
        drop(engine);
        DbEngine::connect(&db_path).await.unwrap();
    }
}
