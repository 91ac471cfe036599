//! Builders shared by the unit tests

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::populate::index_library;
use crate::models::{Album, Artist, ArtistRefItem, FavoriteType, Track};
use crate::stores::{Library, MediaSource};
use crate::utils::hashing::{create_album_hash, create_track_hash};

/// A track with every identity filled in the way ingestion fills it
pub fn make_track(title: &str, album: &str, albumartist: &str, artists: &[&str]) -> Track {
    let mut track = Track::new();
    track.title = title.to_string();
    track.album = album.to_string();
    track.albumartists = vec![ArtistRefItem::from_name(albumartist)];
    track.artists = artists.iter().map(|a| ArtistRefItem::from_name(a)).collect();
    track.filepath = format!("/music/{albumartist}/{album}/{title}.flac");
    track.folder = format!("/music/{albumartist}/{album}");
    track.duration = 200;
    track.bitrate = 320;
    track.albumhash = create_album_hash(album, albumartist);
    track.trackhash = create_track_hash(&track.artist(), album, title);
    track.compute_artisthashes();
    track
}

/// An album credited to `artists`, without type flags
pub fn make_album(title: &str, artists: &[&str]) -> Album {
    let albumartists: Vec<ArtistRefItem> =
        artists.iter().map(|a| ArtistRefItem::from_name(a)).collect();
    let joined = artists.join(", ");

    let mut album = Album::new(create_album_hash(title, &joined), title.to_string());
    album.artisthashes = albumartists.iter().map(|a| a.artisthash.clone()).collect();
    album.albumartists = albumartists;
    album.set_image();
    album
}

/// A library indexed from the given tracks
pub fn library_from(tracks: Vec<Track>) -> Arc<Library> {
    let library = Library::new();
    library.load(index_library(tracks, false), Vec::new());
    Arc::new(library)
}

/// A plain in-memory [`MediaSource`] whose contents tests set directly
#[derive(Debug, Default)]
pub struct FakeSource {
    pub tracks: Vec<Track>,
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    pub favorites: HashSet<(FavoriteType, String)>,
}

impl FakeSource {
    /// Index the tracks and keep everything ingestion produced
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let indexed = index_library(tracks, false);
        Self {
            tracks: indexed.tracks,
            albums: indexed.albums,
            artists: indexed.artists,
            favorites: HashSet::new(),
        }
    }
}

impl MediaSource for FakeSource {
    fn tracks_by_artist(&self, artisthash: &str) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.all_artisthashes().contains(&artisthash))
            .cloned()
            .collect()
    }

    fn tracks_by_album(&self, albumhash: &str) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.albumhash == albumhash)
            .cloned()
            .collect()
    }

    fn albums_by_artist(&self, artisthash: &str) -> Vec<Album> {
        self.albums
            .iter()
            .filter(|a| a.has_albumartist(artisthash))
            .cloned()
            .collect()
    }

    fn album_by_hash(&self, albumhash: &str) -> Option<Album> {
        self.albums.iter().find(|a| a.albumhash == albumhash).cloned()
    }

    fn count_albums_by_artist(&self, artisthash: &str) -> usize {
        self.albums
            .iter()
            .filter(|a| a.has_albumartist(artisthash))
            .count()
    }

    fn artist_by_hash(&self, artisthash: &str) -> Option<Artist> {
        self.artists
            .iter()
            .find(|a| a.artisthash == artisthash)
            .cloned()
    }

    fn is_favorite(&self, hash: &str, kind: FavoriteType) -> bool {
        self.favorites.contains(&(kind, hash.to_string()))
    }
}
