//! Library ingestion: raw tracks in, indexed tracks, albums and artists out

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

use crate::core::albums::{extract_album_tracks, AlbumIndex, AlbumLib};
use crate::core::artist_cache::ArtistsCache;
use crate::core::trackslib::sort_pool;
use crate::core::ArtistLib;
use crate::db::{DbEngine, FavoriteTable, TrackTable};
use crate::error::LibraryError;
use crate::models::{Album, Artist, ArtistRefItem, Track};
use crate::stores::Library;
use crate::utils::hashing::{create_album_hash, create_artist_hash, create_track_hash};

/// Output of one indexing pass
#[derive(Debug, Default)]
pub struct IndexedLibrary {
    /// Valid tracks, grouped by album
    pub tracks: Vec<Track>,
    /// Albums sorted by albumhash
    pub albums: Vec<Album>,
    pub artists: Vec<Artist>,
    /// Number of tracks dropped by validation
    pub rejected: usize,
}

/// Check a track's required fields and fill in its derived identities.
///
/// The albumhash is always recomputed from the album title and album
/// artists, so everything downstream can trust it.
pub fn validate_track(mut track: Track) -> Result<Track, LibraryError> {
    let missing = if track.title.trim().is_empty() {
        Some("missing title")
    } else if track.album.trim().is_empty() {
        Some("missing album")
    } else if track.albumartists.iter().all(|a| a.name.trim().is_empty()) {
        Some("missing album artist")
    } else if track.filepath.trim().is_empty() {
        Some("missing file path")
    } else {
        None
    };

    if let Some(reason) = missing {
        return Err(LibraryError::malformed_track(&track.filepath, reason));
    }

    track.albumartists.retain(|a| !a.name.trim().is_empty());
    track.artists.retain(|a| !a.name.trim().is_empty());
    if track.artists.is_empty() {
        track.artists = track.albumartists.clone();
    }

    for artist in track.albumartists.iter_mut().chain(track.artists.iter_mut()) {
        fill_artisthash(artist);
    }

    track.compute_artisthashes();
    track.albumhash = create_album_hash(&track.album, &track.albumartist());

    if track.trackhash.is_empty() {
        track.trackhash = create_track_hash(&track.artist(), &track.album, &track.title);
    }

    if track.folder.is_empty() {
        if let Some(parent) = Path::new(&track.filepath).parent() {
            track.folder = parent.to_string_lossy().into_owned();
        }
    }

    Ok(track)
}

fn fill_artisthash(artist: &mut ArtistRefItem) {
    if artist.artisthash.is_empty() {
        artist.artisthash = create_artist_hash(&artist.name);
    }
}

/// Validate the tracks, group them into albums and derive the artists.
///
/// Invalid tracks are logged and counted; they never stop the pass.
pub fn index_library(raw_tracks: Vec<Track>, show_progress: bool) -> IndexedLibrary {
    let mut rejected = 0;
    let mut pool = Vec::with_capacity(raw_tracks.len());

    for track in raw_tracks {
        match validate_track(track) {
            Ok(track) => pool.push(track),
            Err(e) => {
                tracing::warn!("Skipping track: {}", e);
                rejected += 1;
            }
        }
    }

    // albums are built in the order their first track appears
    let keys: Vec<(String, String)> = pool
        .iter()
        .map(|t| (t.album.clone(), t.albumartist()))
        .collect();
    sort_pool(&mut pool);

    let progress = progress_bar(keys.len(), show_progress);
    let mut index = AlbumIndex::new();
    let mut tracks = Vec::with_capacity(pool.len());

    for (title, albumartist) in &keys {
        progress.inc(1);

        if index.find_album(title, albumartist).is_some() {
            continue;
        }

        let album_tracks = extract_album_tracks(&mut pool, title, albumartist);
        if let Some(album) = AlbumLib::create_album(&album_tracks) {
            if let Err(e) = index.insert(album) {
                tracing::warn!("Skipping album: {}", e);
            }
        }
        tracks.extend(album_tracks);
    }

    progress.finish_with_message(format!("{} albums", index.len()));

    let albums = index.into_albums();
    let artists = ArtistLib::build_artists(&tracks, &albums);

    tracing::info!(
        "Indexed {} tracks into {} albums and {} artists ({} rejected)",
        tracks.len(),
        albums.len(),
        artists.len(),
        rejected
    );

    IndexedLibrary {
        tracks,
        albums,
        artists,
        rejected,
    }
}

fn progress_bar(len: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len as u64);
    if let Ok(style) =
        ProgressStyle::default_bar().template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
    {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}

/// Load the library from the database into the stores.
///
/// Any reload invalidates every cached artist page.
pub async fn populate_stores(
    engine: &DbEngine,
    library: &Library,
    cache: &ArtistsCache,
    show_progress: bool,
) -> Result<()> {
    tracing::info!("Populating stores from database...");

    let tracks = TrackTable::all(engine.pool()).await?;
    let favorites = FavoriteTable::all(engine.pool()).await?;
    tracing::info!("Loaded {} tracks from database", tracks.len());

    let indexed = index_library(tracks, show_progress);
    library.load(indexed, favorites);
    cache.clear();

    tracing::info!("Store population complete");
    Ok(())
}
