//! Per-album type analysis
//!
//! The aggregation cache does not decide what a single, EP or compilation is.
//! It hands each album and its deduplicated tracks to an [`AlbumAnalyzer`] and
//! only reads the resulting [`AlbumFlags`](crate::models::AlbumFlags).

use crate::models::{Album, Track};

/// Computes an album's release date and type flags from its tracks
pub trait AlbumAnalyzer: Send + Sync {
    /// Must leave `album.flags` set
    fn analyze(&self, album: &mut Album, tracks: &[Track]);
}

/// Title and track-count heuristics over tag data
#[derive(Debug, Clone, Copy, Default)]
pub struct TagHeuristics {
    /// Treat every one-track album as a single
    pub show_albums_as_singles: bool,
}

impl TagHeuristics {
    pub fn new(show_albums_as_singles: bool) -> Self {
        Self {
            show_albums_as_singles,
        }
    }
}

impl AlbumAnalyzer for TagHeuristics {
    fn analyze(&self, album: &mut Album, tracks: &[Track]) {
        album.get_date_from_tracks(tracks);
        album.flags = Some(album.detect_flags(tracks, self.show_albums_as_singles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{make_album, make_track};

    #[test]
    fn test_heuristics_set_flags_and_date() {
        let mut album = make_album("Greatest Hits", &["Queen"]);
        let mut a = make_track("Bohemian Rhapsody", "Greatest Hits", "Queen", &["Queen"]);
        a.date = 1000;
        let mut b = make_track("Another One Bites the Dust", "Greatest Hits", "Queen", &["Queen"]);
        b.date = 900;

        TagHeuristics::default().analyze(&mut album, &[a, b]);

        let flags = album.flags.unwrap();
        assert!(flags.is_compilation());
        assert!(!flags.is_single());
        assert!(!flags.is_ep());
        assert_eq!(album.date, 900);
    }

    #[test]
    fn test_show_albums_as_singles() {
        let track = make_track("Intro", "Some Album", "Band", &["Band"]);

        let mut album = make_album("Some Album", &["Band"]);
        TagHeuristics::new(false).analyze(&mut album, std::slice::from_ref(&track));
        assert!(!album.flags.unwrap().is_single());

        let mut album = make_album("Some Album", &["Band"]);
        TagHeuristics::new(true).analyze(&mut album, &[track]);
        assert!(album.flags.unwrap().is_single());
    }
}
