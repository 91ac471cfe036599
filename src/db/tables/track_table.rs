//! Track table operations

use anyhow::Result;
use sqlx::{FromRow, SqlitePool};

use crate::error::LibraryError;
use crate::models::{ArtistRefItem, Track};

/// Database row for track table
#[derive(Debug, FromRow)]
struct TrackRow {
    id: i64,
    album: String,
    albumartists: String,
    albumhash: String,
    artists: String,
    bitrate: i32,
    date: Option<i64>,
    disc: i32,
    duration: i32,
    filepath: String,
    folder: String,
    title: String,
    track: i32,
    trackhash: String,
}

impl TrackRow {
    fn into_track(self) -> Result<Track, LibraryError> {
        let albumartists: Vec<ArtistRefItem> = serde_json::from_str(&self.albumartists)
            .map_err(|e| LibraryError::malformed_track(&self.filepath, format!("albumartists: {e}")))?;
        let artists: Vec<ArtistRefItem> = serde_json::from_str(&self.artists)
            .map_err(|e| LibraryError::malformed_track(&self.filepath, format!("artists: {e}")))?;

        let artisthashes = artists.iter().map(|a| a.artisthash.clone()).collect();

        Ok(Track {
            id: self.id,
            album: self.album,
            albumartists,
            albumhash: self.albumhash,
            artists,
            bitrate: self.bitrate,
            date: self.date.unwrap_or(0),
            disc: self.disc,
            duration: self.duration,
            filepath: self.filepath,
            folder: self.folder,
            title: self.title,
            track: self.track,
            trackhash: self.trackhash,
            artisthashes,
            image: String::new(),
        })
    }
}

/// Track table operations
pub struct TrackTable;

impl TrackTable {
    /// Get all tracks. Rows that cannot be decoded are logged and skipped.
    pub async fn all(pool: &SqlitePool) -> Result<Vec<Track>> {
        let rows: Vec<TrackRow> = sqlx::query_as("SELECT * FROM track ORDER BY id")
            .fetch_all(pool)
            .await?;

        let tracks = rows
            .into_iter()
            .filter_map(|row| match row.into_track() {
                Ok(track) => Some(track),
                Err(e) => {
                    tracing::warn!("Skipping track row: {}", e);
                    None
                }
            })
            .collect();

        Ok(tracks)
    }

    /// Insert tracks in one transaction, replacing rows with the same file path
    pub async fn insert_many(pool: &SqlitePool, tracks: &[Track]) -> Result<u64> {
        let mut tx = pool.begin().await?;
        let mut inserted = 0;

        for track in tracks {
            let albumartists = serde_json::to_string(&track.albumartists)?;
            let artists = serde_json::to_string(&track.artists)?;

            let result = sqlx::query(
                r#"
                INSERT OR REPLACE INTO track (
                    album, albumartists, albumhash, artists, bitrate, date, disc,
                    duration, filepath, folder, title, track, trackhash
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&track.album)
            .bind(&albumartists)
            .bind(&track.albumhash)
            .bind(&artists)
            .bind(track.bitrate)
            .bind(track.date)
            .bind(track.disc)
            .bind(track.duration)
            .bind(&track.filepath)
            .bind(&track.folder)
            .bind(&track.title)
            .bind(track.track)
            .bind(&track.trackhash)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Get total track count
    pub async fn count(pool: &SqlitePool) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM track")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
