//! Favorite table operations

use anyhow::Result;
use sqlx::{FromRow, SqlitePool};

use crate::models::{Favorite, FavoriteType};

/// Database row for favorite table
#[derive(Debug, FromRow)]
struct FavoriteRow {
    id: i64,
    hash: String,
    #[sqlx(rename = "type")]
    fav_type: String,
    timestamp: i64,
}

impl FavoriteRow {
    fn into_favorite(self) -> Option<Favorite> {
        Some(Favorite {
            id: self.id,
            hash: self.hash,
            favorite_type: FavoriteType::parse(&self.fav_type)?,
            timestamp: self.timestamp,
        })
    }
}

/// Favorite table operations
pub struct FavoriteTable;

impl FavoriteTable {
    /// Get all favorites, newest first. Rows of an unknown type are skipped.
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Favorite>> {
        let rows: Vec<FavoriteRow> = sqlx::query_as("SELECT * FROM favorite ORDER BY timestamp DESC")
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().filter_map(|r| r.into_favorite()).collect())
    }

    /// Mark an item as favorite. Adding an existing favorite is a no-op.
    pub async fn add(pool: &SqlitePool, hash: &str, fav_type: FavoriteType) -> Result<()> {
        let favorite = Favorite::new(hash.to_string(), fav_type);

        sqlx::query("INSERT OR IGNORE INTO favorite (hash, type, timestamp) VALUES (?, ?, ?)")
            .bind(&favorite.hash)
            .bind(fav_type.as_str())
            .bind(favorite.timestamp)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Check if an item is a favorite
    pub async fn is_favorite(pool: &SqlitePool, hash: &str, fav_type: FavoriteType) -> Result<bool> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM favorite WHERE hash = ? AND type = ?")
                .bind(hash)
                .bind(fav_type.as_str())
                .fetch_one(pool)
                .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbEngine;

    #[tokio::test]
    async fn test_add_and_check() {
        let engine = DbEngine::in_memory().await.unwrap();
        let pool = engine.pool();

        FavoriteTable::add(pool, "abc", FavoriteType::Artist).await.unwrap();
        FavoriteTable::add(pool, "abc", FavoriteType::Artist).await.unwrap();

        assert!(FavoriteTable::is_favorite(pool, "abc", FavoriteType::Artist).await.unwrap());
        assert!(!FavoriteTable::is_favorite(pool, "abc", FavoriteType::Album).await.unwrap());

        let all = FavoriteTable::all(pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].favorite_type, FavoriteType::Artist);
    }

    #[tokio::test]
    async fn test_unknown_type_is_skipped() {
        let engine = DbEngine::in_memory().await.unwrap();
        sqlx::query("INSERT INTO favorite (hash, type, timestamp) VALUES ('x', 'podcast', 1)")
            .execute(engine.pool())
            .await
            .unwrap();

        assert!(FavoriteTable::all(engine.pool()).await.unwrap().is_empty());
    }
}
