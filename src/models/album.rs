//! Album model

use serde::{Deserialize, Serialize};

use super::{ArtistRefItem, Track};
use crate::utils::hashing::create_hash;

/// Release-type flags computed by the per-album analysis pass.
///
/// A single is never also an EP; the constructor enforces it so every
/// consumer can treat the two as mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFlags {
    is_single: bool,
    #[serde(rename = "is_EP")]
    is_ep: bool,
    is_compilation: bool,
    #[serde(default)]
    is_soundtrack: bool,
    #[serde(default)]
    is_live: bool,
}

impl AlbumFlags {
    pub fn new(is_single: bool, is_ep: bool, is_compilation: bool) -> Self {
        Self {
            is_single,
            is_ep: is_ep && !is_single,
            is_compilation,
            is_soundtrack: false,
            is_live: false,
        }
    }

    pub fn with_soundtrack(mut self, is_soundtrack: bool) -> Self {
        self.is_soundtrack = is_soundtrack;
        self
    }

    pub fn with_live(mut self, is_live: bool) -> Self {
        self.is_live = is_live;
        self
    }

    pub fn is_single(&self) -> bool {
        self.is_single
    }

    pub fn is_ep(&self) -> bool {
        self.is_ep
    }

    pub fn is_compilation(&self) -> bool {
        self.is_compilation
    }

    pub fn is_soundtrack(&self) -> bool {
        self.is_soundtrack
    }

    pub fn is_live(&self) -> bool {
        self.is_live
    }
}

/// An album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Album artists (primary credits)
    #[serde(default)]
    pub albumartists: Vec<ArtistRefItem>,
    /// Unique album hash
    pub albumhash: String,
    /// Identities of the primary album artists
    #[serde(default)]
    pub artisthashes: Vec<String>,
    /// Release date (Unix timestamp)
    #[serde(default)]
    pub date: i64,
    /// Total duration in seconds
    #[serde(default)]
    pub duration: i32,
    /// Original title (before processing)
    #[serde(default)]
    pub og_title: String,
    /// Processed title
    pub title: String,
    /// Number of tracks
    #[serde(default)]
    pub trackcount: i32,
    /// Image path
    #[serde(default)]
    pub image: String,
    /// Type flags, absent until the analysis pass has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<AlbumFlags>,
}

impl Album {
    /// Create a new album with default values
    pub fn new(albumhash: String, title: String) -> Self {
        Self {
            albumartists: Vec::new(),
            albumhash,
            artisthashes: Vec::new(),
            date: 0,
            duration: 0,
            og_title: title.clone(),
            title,
            trackcount: 0,
            image: String::new(),
            flags: None,
        }
    }

    /// Whether the artist is credited as a primary album artist
    pub fn has_albumartist(&self, artisthash: &str) -> bool {
        self.artisthashes.iter().any(|h| h == artisthash)
    }

    /// Generate the image path
    pub fn set_image(&mut self) {
        self.image = format!("{}.webp", self.albumhash);
    }

    /// Set the release date to the earliest dated track
    pub fn get_date_from_tracks(&mut self, tracks: &[Track]) {
        if let Some(date) = tracks.iter().map(|t| t.date).filter(|d| *d > 0).min() {
            self.date = date;
        }
    }

    /// Run every type heuristic against the album and its tracks
    pub fn detect_flags(&self, tracks: &[Track], show_as_singles: bool) -> AlbumFlags {
        AlbumFlags::new(
            self.is_single(tracks, show_as_singles),
            self.is_ep(),
            self.is_compilation(),
        )
        .with_soundtrack(self.is_soundtrack())
        .with_live(self.is_live_album())
    }

    /// Check if this is a soundtrack
    fn is_soundtrack(&self) -> bool {
        let title_lower = self.og_title.to_lowercase();
        title_lower.contains("motion picture") || title_lower.contains("soundtrack")
    }

    /// Check if this is a compilation
    fn is_compilation(&self) -> bool {
        let artists = self
            .albumartists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<String>()
            .to_lowercase();

        if artists.contains("various artists") {
            return true;
        }

        let substrings = [
            "the essential",
            "best of",
            "greatest hits",
            "#1 hits",
            "number ones",
            "super hits",
            "collection",
            "anthology",
            "great hits",
            "biggest hits",
            "the hits",
            "the ultimate",
            "compilation",
        ];

        let title_lower = self.title.to_lowercase();
        substrings.iter().any(|s| title_lower.contains(s))
    }

    /// Check if this is a live album
    fn is_live_album(&self) -> bool {
        let title_lower = self.og_title.to_lowercase();
        let keywords = ["live from", "live at", "live in", "live on", "mtv unplugged"];
        keywords.iter().any(|k| title_lower.contains(k))
    }

    /// Check if this is an EP
    fn is_ep(&self) -> bool {
        self.title.trim_end().ends_with(" EP")
    }

    /// Check if this is a single
    fn is_single(&self, tracks: &[Track], show_as_singles: bool) -> bool {
        let keywords = ["single version", "- single"];
        let og = self.og_title.to_lowercase();
        if keywords.iter().any(|k| og.contains(k)) {
            return true;
        }

        if show_as_singles && tracks.len() == 1 {
            return true;
        }

        if let [track] = tracks {
            let track_hash = create_hash(&[track.title.as_str()], false);
            let title_hash = create_hash(&[self.title.as_str()], false);
            let og_title_hash = create_hash(&[self.og_title.as_str()], false);

            if track_hash == title_hash || track_hash == og_title_hash {
                return true;
            }
        }

        false
    }
}

impl Default for Album {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl PartialEq for Album {
    fn eq(&self, other: &Self) -> bool {
        self.albumhash == other.albumhash
    }
}

impl Eq for Album {}

impl std::hash::Hash for Album {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.albumhash.hash(state);
    }
}
