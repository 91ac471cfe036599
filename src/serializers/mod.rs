//! Serializers for converting library models to API responses

use serde::Serialize;

use crate::core::artistlib::{ArtistAlbums, ArtistSummary};
use crate::models::{Album, Artist, ArtistRefItem, Track};

#[derive(Debug, Clone, Serialize)]
pub struct TrackResponse {
    pub trackhash: String,
    pub title: String,
    pub album: String,
    pub albumhash: String,
    pub artists: Vec<ArtistRefItem>,
    pub albumartists: Vec<ArtistRefItem>,
    pub duration: i32,
    pub filepath: String,
    pub trackno: i32,
    pub discno: i32,
    pub date: i64,
    pub bitrate: i32,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlbumResponse {
    pub albumhash: String,
    pub title: String,
    pub albumartists: Vec<ArtistRefItem>,
    pub date: i64,
    pub duration: i32,
    pub trackcount: i32,
    pub image: Option<String>,
    pub is_single: bool,
    #[serde(rename = "is_EP")]
    pub is_ep: bool,
    pub is_compilation: bool,
    pub is_soundtrack: bool,
    pub is_live: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistResponse {
    pub artisthash: String,
    pub name: String,
    pub albumcount: i32,
    pub trackcount: i32,
    pub duration: i32,
    pub image: Option<String>,
    pub is_favorite: bool,
}

/// `GET /artist/{hash}`
#[derive(Debug, Clone, Serialize)]
pub struct ArtistSummaryResponse {
    pub artist: ArtistResponse,
    pub tracks: Vec<TrackResponse>,
}

/// `GET /artist/{hash}/albums`
#[derive(Debug, Clone, Serialize)]
pub struct ArtistAlbumsResponse {
    pub artistname: String,
    pub albums: Vec<AlbumResponse>,
    pub singles: Vec<AlbumResponse>,
    pub eps: Vec<AlbumResponse>,
    pub appearances: Vec<AlbumResponse>,
    pub compilations: Vec<AlbumResponse>,
}

/// `GET /artist/{hash}/tracks`
#[derive(Debug, Clone, Serialize)]
pub struct ArtistTracksResponse {
    pub tracks: Vec<TrackResponse>,
}

fn non_empty(image: String) -> Option<String> {
    if image.is_empty() {
        None
    } else {
        Some(image)
    }
}

impl From<Track> for TrackResponse {
    fn from(track: Track) -> Self {
        Self {
            trackhash: track.trackhash,
            title: track.title,
            album: track.album,
            albumhash: track.albumhash,
            artists: track.artists,
            albumartists: track.albumartists,
            duration: track.duration,
            filepath: track.filepath,
            trackno: track.track,
            discno: track.disc,
            date: track.date,
            bitrate: track.bitrate,
            image: non_empty(track.image),
        }
    }
}

impl From<Album> for AlbumResponse {
    fn from(album: Album) -> Self {
        let flags = album.flags.unwrap_or_default();
        Self {
            albumhash: album.albumhash,
            title: album.title,
            albumartists: album.albumartists,
            date: album.date,
            duration: album.duration,
            trackcount: album.trackcount,
            image: non_empty(album.image),
            is_single: flags.is_single(),
            is_ep: flags.is_ep(),
            is_compilation: flags.is_compilation(),
            is_soundtrack: flags.is_soundtrack(),
            is_live: flags.is_live(),
        }
    }
}

impl From<Artist> for ArtistResponse {
    fn from(artist: Artist) -> Self {
        Self {
            artisthash: artist.artisthash,
            name: artist.name,
            albumcount: artist.albumcount,
            trackcount: artist.trackcount,
            duration: artist.duration,
            image: non_empty(artist.image),
            is_favorite: artist.is_favorite,
        }
    }
}

impl From<ArtistSummary> for ArtistSummaryResponse {
    fn from(summary: ArtistSummary) -> Self {
        Self {
            artist: summary.artist.into(),
            tracks: serialize_tracks(summary.tracks),
        }
    }
}

impl From<ArtistAlbums> for ArtistAlbumsResponse {
    fn from(page: ArtistAlbums) -> Self {
        let groups = page.groups;
        Self {
            artistname: page.artistname,
            albums: serialize_albums(groups.albums),
            singles: serialize_albums(groups.singles),
            eps: serialize_albums(groups.eps),
            appearances: serialize_albums(groups.appearances),
            compilations: serialize_albums(groups.compilations),
        }
    }
}

pub fn serialize_tracks(tracks: Vec<Track>) -> Vec<TrackResponse> {
    tracks.into_iter().map(TrackResponse::from).collect()
}

pub fn serialize_albums(albums: Vec<Album>) -> Vec<AlbumResponse> {
    albums.into_iter().map(AlbumResponse::from).collect()
}
