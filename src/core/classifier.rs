//! Splits an artist's albums into the groups shown on the artist page

use serde::Serialize;

use crate::error::{LibraryError, Result};
use crate::models::{Album, AlbumFlags};

/// An artist's albums grouped for display.
///
/// `albums`, `singles`, `eps` and `compilations` never share an album.
/// `appearances` holds albums the artist is not a primary credit on, so it
/// never overlaps `albums` or `compilations`.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ArtistAlbumGroups {
    pub albums: Vec<Album>,
    pub singles: Vec<Album>,
    pub eps: Vec<Album>,
    pub appearances: Vec<Album>,
    pub compilations: Vec<Album>,
}

impl ArtistAlbumGroups {
    /// Cut every group to at most `limit` albums, keeping order
    pub fn truncate(&mut self, limit: usize) {
        self.albums.truncate(limit);
        self.singles.truncate(limit);
        self.eps.truncate(limit);
        self.appearances.truncate(limit);
        self.compilations.truncate(limit);
    }
}

/// Group type-checked albums for one artist.
///
/// Singles and EPs are grouped regardless of the artist's role. Of the rest,
/// albums crediting the artist go to `compilations` when flagged as such and
/// to `albums` otherwise; albums not crediting the artist are `appearances`.
/// Fails if any album has not been through the type analysis.
pub fn classify_albums(artisthash: &str, all_albums: &[Album]) -> Result<ArtistAlbumGroups> {
    let typed = all_albums
        .iter()
        .map(|album| {
            album
                .flags
                .map(|flags| (album, flags))
                .ok_or_else(|| LibraryError::UnclassifiedAlbum(album.albumhash.clone()))
        })
        .collect::<Result<Vec<(&Album, AlbumFlags)>>>()?;

    let regular = |flags: &AlbumFlags| !flags.is_ep() && !flags.is_single();

    Ok(ArtistAlbumGroups {
        singles: pick(&typed, |_, f| f.is_single()),
        eps: pick(&typed, |_, f| f.is_ep()),
        albums: pick(&typed, |a, f| {
            a.has_albumartist(artisthash) && regular(f) && !f.is_compilation()
        }),
        compilations: pick(&typed, |a, f| {
            a.has_albumartist(artisthash) && regular(f) && f.is_compilation()
        }),
        appearances: pick(&typed, |a, f| !a.has_albumartist(artisthash) && regular(f)),
    })
}

fn pick<F>(typed: &[(&Album, AlbumFlags)], keep: F) -> Vec<Album>
where
    F: Fn(&Album, &AlbumFlags) -> bool,
{
    typed
        .iter()
        .filter(|(album, flags)| keep(album, flags))
        .map(|(album, _)| (*album).clone())
        .collect()
}
