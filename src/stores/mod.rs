//! In-memory stores for tracks, albums, artists, and favorites

mod album_store;
mod artist_store;
mod favorite_store;
mod library;
mod track_store;

pub use album_store::AlbumStore;
pub use artist_store::ArtistStore;
pub use favorite_store::FavoriteStore;
pub use library::Library;
pub use track_store::TrackStore;

use crate::models::{Album, Artist, FavoriteType, Track};

/// Read-only queries the artist pages are built from.
///
/// Everything is looked up by identity. Implementations must be cheap to call
/// repeatedly; the aggregation cache calls them once per stage.
pub trait MediaSource: Send + Sync {
    /// Tracks where the artist is a track artist or an album artist
    fn tracks_by_artist(&self, artisthash: &str) -> Vec<Track>;

    /// Every stored copy of an album's tracks, duplicates included
    fn tracks_by_album(&self, albumhash: &str) -> Vec<Track>;

    /// Albums crediting the artist as a primary album artist
    fn albums_by_artist(&self, artisthash: &str) -> Vec<Album>;

    fn album_by_hash(&self, albumhash: &str) -> Option<Album>;

    fn count_albums_by_artist(&self, artisthash: &str) -> usize;

    fn artist_by_hash(&self, artisthash: &str) -> Option<Artist>;

    fn is_favorite(&self, hash: &str, kind: FavoriteType) -> bool;
}
