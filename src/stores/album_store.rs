//! Album store - in-memory album storage with efficient lookups

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::core::albums::AlbumIndex;
use crate::models::Album;

/// In-memory store for albums
#[derive(Default)]
pub struct AlbumStore {
    /// All albums by albumhash
    albums: RwLock<HashMap<String, Album>>,
    /// Albums by primary album artist hash
    albums_by_artist: RwLock<HashMap<String, Vec<String>>>,
}

impl AlbumStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents. Albums without a hash are dropped and only
    /// the first album per hash is kept.
    pub fn load(&self, albums: Vec<Album>) {
        let index = AlbumIndex::from_albums(albums);

        let mut album_map = self.albums.write();
        let mut artist_map = self.albums_by_artist.write();

        album_map.clear();
        artist_map.clear();

        for album in index.into_albums() {
            let hash = album.albumhash.clone();

            for artist in &album.artisthashes {
                let hashes = artist_map.entry(artist.clone()).or_default();
                if !hashes.contains(&hash) {
                    hashes.push(hash.clone());
                }
            }

            album_map.insert(hash, album);
        }
    }

    /// Get total album count
    pub fn count(&self) -> usize {
        self.albums.read().len()
    }

    /// Get album by hash
    pub fn get_by_hash(&self, hash: &str) -> Option<Album> {
        self.albums.read().get(hash).cloned()
    }

    /// Get albums by hashes
    pub fn get_by_hashes(&self, hashes: &[String]) -> Vec<Album> {
        let albums = self.albums.read();
        hashes
            .iter()
            .filter_map(|h| albums.get(h).cloned())
            .collect()
    }

    /// Get albums crediting the artist as a primary album artist
    pub fn get_by_artist(&self, artisthash: &str) -> Vec<Album> {
        let hashes = self
            .albums_by_artist
            .read()
            .get(artisthash)
            .cloned()
            .unwrap_or_default();
        self.get_by_hashes(&hashes)
    }

    /// Count albums crediting the artist as a primary album artist
    pub fn count_by_artist(&self, artisthash: &str) -> usize {
        self.albums_by_artist
            .read()
            .get(artisthash)
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::make_album;

    #[test]
    fn test_albums_by_primary_artist() {
        let store = AlbumStore::new();
        let a = make_album("Album A", &["X"]);
        let b = make_album("Album B", &["X", "Y"]);
        let c = make_album("Album C", &["Y"]);
        store.load(vec![a.clone(), b.clone(), c]);

        let x = crate::utils::hashing::create_artist_hash("X");
        let mut albums = store.get_by_artist(&x);
        albums.sort_by(|l, r| l.title.cmp(&r.title));
        assert_eq!(albums, vec![a.clone(), b]);
        assert_eq!(store.count_by_artist(&x), 2);
        assert_eq!(store.count_by_artist("missing"), 0);
        assert_eq!(store.get_by_hash(&a.albumhash), Some(a));
    }

    #[test]
    fn test_load_drops_albums_without_hash() {
        let store = AlbumStore::new();
        let good = make_album("Album A", &["X"]);
        let mut broken = make_album("Broken", &["X"]);
        broken.albumhash.clear();
        store.load(vec![broken, good.clone(), good.clone()]);

        let x = crate::utils::hashing::create_artist_hash("X");
        assert_eq!(store.count(), 1);
        assert_eq!(store.count_by_artist(&x), 1);
        assert_eq!(store.get_by_hash(&good.albumhash), Some(good));
    }
}
