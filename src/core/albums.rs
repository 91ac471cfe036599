//! Album construction and lookup used while indexing the library
//!
//! [`AlbumIndex`] keeps albums sorted by albumhash so an album can be found by
//! `(title, albumartist)` with a binary search. [`extract_album_tracks`] pulls
//! one album's tracks out of a shared pool of not-yet-grouped tracks.

use crate::core::trackslib::{find_track, is_sorted_pool};
use crate::error::{LibraryError, Result};
use crate::models::{Album, Track};
use crate::utils::hashing::create_album_hash;

/// Albums sorted by albumhash
#[derive(Debug, Default, Clone)]
pub struct AlbumIndex {
    albums: Vec<Album>,
}

impl AlbumIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from arbitrary albums. Malformed albums are dropped with
    /// a warning, later duplicates of the same hash are ignored.
    pub fn from_albums(albums: Vec<Album>) -> Self {
        let mut index = Self::new();
        for album in albums {
            if let Err(e) = index.insert(album) {
                tracing::warn!("Skipping album: {}", e);
            }
        }
        index
    }

    /// Find an album by title and album artist
    pub fn find_album(&self, title: &str, albumartist: &str) -> Option<usize> {
        self.find_by_hash(&create_album_hash(title, albumartist))
    }

    /// Find an album by albumhash
    pub fn find_by_hash(&self, albumhash: &str) -> Option<usize> {
        self.albums
            .binary_search_by(|a| a.albumhash.as_str().cmp(albumhash))
            .ok()
    }

    /// Insert an album at its sorted position.
    ///
    /// Returns `Ok(false)` when an album with the same hash is already indexed.
    pub fn insert(&mut self, album: Album) -> Result<bool> {
        if album.albumhash.is_empty() {
            return Err(LibraryError::MalformedAlbum {
                title: album.title,
                reason: "missing albumhash".to_string(),
            });
        }

        match self
            .albums
            .binary_search_by(|a| a.albumhash.cmp(&album.albumhash))
        {
            Ok(_) => Ok(false),
            Err(pos) => {
                self.albums.insert(pos, album);
                Ok(true)
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, idx: usize) -> Option<&Album> {
        self.albums.get(idx)
    }

    pub fn len(&self) -> usize {
        self.albums.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Album> {
        self.albums.iter()
    }

    pub fn into_albums(self) -> Vec<Album> {
        self.albums
    }
}

/// Remove every track of one album from the pool and return them.
///
/// `pool` must be sorted by albumhash. The pool is partitioned in place: the
/// returned tracks are no longer in it, and the caller decides where they go.
pub fn extract_album_tracks(pool: &mut Vec<Track>, title: &str, albumartist: &str) -> Vec<Track> {
    let albumhash = create_album_hash(title, albumartist);
    extract_tracks_by_hash(pool, &albumhash)
}

/// Same as [`extract_album_tracks`] for an already computed albumhash
pub fn extract_tracks_by_hash(pool: &mut Vec<Track>, albumhash: &str) -> Vec<Track> {
    debug_assert!(is_sorted_pool(pool), "track pool must be sorted by albumhash");

    let Some(start) = find_track(pool, albumhash) else {
        return Vec::new();
    };

    // matches are contiguous in a sorted pool
    let end = start + pool[start..].partition_point(|t| t.albumhash == albumhash);
    pool.drain(start..end).collect()
}

/// Album library functions
pub struct AlbumLib;

impl AlbumLib {
    /// Build an album from its tracks. Title and artists come from the first
    /// track, the date is the earliest dated track.
    pub fn create_album(tracks: &[Track]) -> Option<Album> {
        let first = tracks.first()?;

        let mut album = Album::new(first.albumhash.clone(), first.album.clone());
        album.albumartists = first.albumartists.clone();
        album.artisthashes = first
            .albumartists
            .iter()
            .map(|a| a.artisthash.clone())
            .collect();
        album.trackcount = i32::try_from(tracks.len()).unwrap_or(i32::MAX);
        album.duration = tracks.iter().map(|t| t.duration).sum();
        album.get_date_from_tracks(tracks);
        album.set_image();

        Some(album)
    }
}
