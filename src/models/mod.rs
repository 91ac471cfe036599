//! Data models for the artist service
//!
//! Tracks are immutable once ingested; albums and artists are derived from them.

mod album;
mod artist;
mod favorite;
mod track;

pub use album::{Album, AlbumFlags};
pub use artist::Artist;
pub use favorite::{Favorite, FavoriteType};
pub use track::Track;

/// Reference to an artist (used in track/album artist lists)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArtistRefItem {
    pub name: String,
    #[serde(default)]
    pub artisthash: String,
}

impl ArtistRefItem {
    pub fn new(name: String, artisthash: String) -> Self {
        Self { name, artisthash }
    }

    /// Build a reference whose identity is derived from the name
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            artisthash: crate::utils::hashing::create_artist_hash(name),
        }
    }
}
