//! Track store - in-memory track storage with efficient lookups

use parking_lot::RwLock;
use std::collections::HashMap;

use crate::models::Track;

/// Tracks plus the indices into them. Positions are kept rather than
/// trackhashes because duplicate copies of a track share a hash and both
/// have to survive until deduplication.
#[derive(Default)]
struct TrackIndex {
    tracks: Vec<Track>,
    by_album: HashMap<String, Vec<usize>>,
    by_artist: HashMap<String, Vec<usize>>,
}

/// In-memory store for tracks
#[derive(Default)]
pub struct TrackStore {
    inner: RwLock<TrackIndex>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the store contents
    pub fn load(&self, tracks: Vec<Track>) {
        let mut index = TrackIndex::default();

        for (pos, track) in tracks.iter().enumerate() {
            index
                .by_album
                .entry(track.albumhash.clone())
                .or_default()
                .push(pos);

            // index under track artists and album artists alike
            for artisthash in track.all_artisthashes() {
                index
                    .by_artist
                    .entry(artisthash.to_string())
                    .or_default()
                    .push(pos);
            }
        }

        index.tracks = tracks;
        *self.inner.write() = index;
    }

    /// Get total track count
    pub fn count(&self) -> usize {
        self.inner.read().tracks.len()
    }

    /// Get tracks by album hash
    pub fn get_by_album(&self, albumhash: &str) -> Vec<Track> {
        let index = self.inner.read();
        Self::collect(&index, index.by_album.get(albumhash))
    }

    /// Get tracks by artist hash
    pub fn get_by_artist(&self, artisthash: &str) -> Vec<Track> {
        let index = self.inner.read();
        Self::collect(&index, index.by_artist.get(artisthash))
    }

    fn collect(index: &TrackIndex, positions: Option<&Vec<usize>>) -> Vec<Track> {
        positions
            .map(|positions| {
                positions
                    .iter()
                    .filter_map(|pos| index.tracks.get(*pos).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}
