//! Artist construction and the artist page queries

use serde::Serialize;
use std::collections::HashMap;

use crate::core::artist_cache::ArtistsCache;
use crate::core::classifier::{classify_albums, ArtistAlbumGroups};
use crate::error::{LibraryError, Result};
use crate::models::{Album, Artist, FavoriteType, Track};

/// Artists with no primary albums and fewer tracks than this get every
/// track on their summary
pub const SINGLES_ONLY_TRACK_LIMIT: usize = 10;

/// Artist header plus the top of their track list
#[derive(Debug, Clone, Serialize)]
pub struct ArtistSummary {
    pub artist: Artist,
    pub tracks: Vec<Track>,
}

/// An artist's albums, grouped and truncated for display
#[derive(Debug, Clone, Serialize)]
pub struct ArtistAlbums {
    pub artistname: String,
    #[serde(flatten)]
    pub groups: ArtistAlbumGroups,
}

/// Artist library functions
pub struct ArtistLib;

impl ArtistLib {
    /// Build artists from track artists and album artists
    pub fn build_artists(tracks: &[Track], albums: &[Album]) -> Vec<Artist> {
        let mut artist_map: HashMap<String, Artist> = HashMap::new();
        let mut durations: HashMap<String, i64> = HashMap::new();

        for track in tracks {
            for artist_ref in track.artists.iter().chain(&track.albumartists) {
                artist_map
                    .entry(artist_ref.artisthash.clone())
                    .or_insert_with(|| {
                        let mut artist =
                            Artist::new(artist_ref.name.clone(), artist_ref.artisthash.clone());
                        artist.created_date = track.date;
                        artist
                    });
            }

            for hash in track.all_artisthashes() {
                if let Some(artist) = artist_map.get_mut(hash) {
                    artist.trackcount = artist.trackcount.saturating_add(1);
                    *durations.entry(hash.to_string()).or_default() += i64::from(track.duration);
                }
            }
        }

        for album in albums {
            for hash in &album.artisthashes {
                if let Some(artist) = artist_map.get_mut(hash) {
                    artist.albumcount = artist.albumcount.saturating_add(1);
                }
            }
        }

        let mut artists: Vec<Artist> = artist_map.into_values().collect();
        for artist in artists.iter_mut() {
            artist.set_duration(durations.get(&artist.artisthash).copied().unwrap_or(0));
            artist.set_image();
        }

        artists.sort_by(|a, b| a.artisthash.cmp(&b.artisthash));
        artists
    }

    /// The artist with their counters refreshed and up to `limit` tracks.
    ///
    /// An artist with no primary albums and fewer than
    /// [`SINGLES_ONLY_TRACK_LIMIT`] tracks gets all of them regardless of
    /// `limit`.
    pub fn get_artist_summary(
        cache: &ArtistsCache,
        artisthash: &str,
        limit: usize,
    ) -> Result<ArtistSummary> {
        let source = cache.source();
        let mut artist = source
            .artist_by_hash(artisthash)
            .ok_or_else(|| LibraryError::ArtistNotFound(artisthash.to_string()))?;

        let mut tracks = cache.artist_tracks(artisthash);
        let trackcount = tracks.len();
        let albumcount = source.count_albums_by_artist(artisthash);

        artist.set_trackcount(trackcount);
        artist.set_albumcount(albumcount);
        artist.set_duration(tracks.iter().map(|t| i64::from(t.duration)).sum());
        artist.is_favorite = source.is_favorite(artisthash, FavoriteType::Artist);

        let limit = if albumcount == 0 && trackcount < SINGLES_ONLY_TRACK_LIMIT {
            trackcount
        } else {
            limit
        };
        tracks.truncate(limit);

        Ok(ArtistSummary { artist, tracks })
    }

    /// The artist's albums in five groups of at most `limit` each.
    ///
    /// With `return_all` the limit becomes the number of albums fetched for
    /// the artist, which no group can exceed.
    pub fn get_artist_albums(
        cache: &ArtistsCache,
        artisthash: &str,
        limit: usize,
        return_all: bool,
    ) -> Result<ArtistAlbums> {
        let artist = cache
            .source()
            .artist_by_hash(artisthash)
            .ok_or_else(|| LibraryError::ArtistNotFound(artisthash.to_string()))?;

        let all_albums = cache.classified_albums(artisthash)?;
        let mut groups = classify_albums(artisthash, &all_albums)?;

        let limit = if return_all { all_albums.len() } else { limit };
        groups.truncate(limit);

        Ok(ArtistAlbums {
            artistname: artist.name,
            groups,
        })
    }

    /// Every track the artist is credited on, straight from the store
    pub fn get_all_tracks(cache: &ArtistsCache, artisthash: &str) -> Result<Vec<Track>> {
        let source = cache.source();
        if source.artist_by_hash(artisthash).is_none() {
            return Err(LibraryError::ArtistNotFound(artisthash.to_string()));
        }

        Ok(source.tracks_by_artist(artisthash))
    }
}
