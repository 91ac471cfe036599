//! Artist store - in-memory artist storage

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::models::Artist;

/// In-memory store for artists
#[derive(Default)]
pub struct ArtistStore {
    /// All artists by artisthash
    artists: RwLock<HashMap<String, Artist>>,
}

impl ArtistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents
    pub fn load(&self, artists: Vec<Artist>) {
        let mut artist_map = self.artists.write();
        artist_map.clear();

        for mut artist in artists {
            // generate artist image path if not already set
            if artist.image.is_empty() {
                artist.set_image();
            }

            artist_map.insert(artist.artisthash.clone(), artist);
        }
    }

    /// Get total artist count
    pub fn count(&self) -> usize {
        self.artists.read().len()
    }

    /// Get artist by hash
    pub fn get_by_hash(&self, hash: &str) -> Option<Artist> {
        self.artists.read().get(hash).cloned()
    }
}
