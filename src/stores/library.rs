//! The loaded library: all stores behind one handle

use super::{AlbumStore, ArtistStore, FavoriteStore, MediaSource, TrackStore};
use crate::core::populate::IndexedLibrary;
use crate::models::{Album, Artist, Favorite, FavoriteType, Track};

/// Owns every in-memory store. Built once in `main` and shared with the
/// request handlers; reloaded in place when the library is re-indexed.
#[derive(Default)]
pub struct Library {
    pub tracks: TrackStore,
    pub albums: AlbumStore,
    pub artists: ArtistStore,
    pub favorites: FavoriteStore,
}

impl Library {
    pub fn new() -> Self {
        Self {
            tracks: TrackStore::new(),
            albums: AlbumStore::new(),
            artists: ArtistStore::new(),
            favorites: FavoriteStore::new(),
        }
    }

    /// Replace every store with freshly indexed data
    pub fn load(&self, indexed: IndexedLibrary, favorites: Vec<Favorite>) {
        if indexed.rejected > 0 {
            tracing::warn!("{} tracks were rejected while indexing", indexed.rejected);
        }

        self.tracks.load(indexed.tracks);
        self.albums.load(indexed.albums);
        self.artists.load(indexed.artists);
        self.favorites.load(favorites);

        tracing::info!(
            "Library loaded: {} tracks, {} albums, {} artists, {} favorites",
            self.tracks.count(),
            self.albums.count(),
            self.artists.count(),
            self.favorites.count()
        );
    }
}

impl MediaSource for Library {
    fn tracks_by_artist(&self, artisthash: &str) -> Vec<Track> {
        self.tracks.get_by_artist(artisthash)
    }

    fn tracks_by_album(&self, albumhash: &str) -> Vec<Track> {
        self.tracks.get_by_album(albumhash)
    }

    fn albums_by_artist(&self, artisthash: &str) -> Vec<Album> {
        self.albums.get_by_artist(artisthash)
    }

    fn album_by_hash(&self, albumhash: &str) -> Option<Album> {
        self.albums.get_by_hash(albumhash)
    }

    fn count_albums_by_artist(&self, artisthash: &str) -> usize {
        self.albums.count_by_artist(artisthash)
    }

    fn artist_by_hash(&self, artisthash: &str) -> Option<Artist> {
        self.artists.get_by_hash(artisthash)
    }

    fn is_favorite(&self, hash: &str, kind: FavoriteType) -> bool {
        self.favorites.is_favorite(hash, kind)
    }
}
