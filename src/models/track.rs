//! Track model

use serde::{Deserialize, Serialize};

use super::ArtistRefItem;

/// A music track
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Database ID
    #[serde(default)]
    pub id: i64,
    /// Album name
    pub album: String,
    /// Album artists
    #[serde(default)]
    pub albumartists: Vec<ArtistRefItem>,
    /// Album hash
    #[serde(default)]
    pub albumhash: String,
    /// Track artists
    #[serde(default)]
    pub artists: Vec<ArtistRefItem>,
    /// Bitrate in kbps
    #[serde(default)]
    pub bitrate: i32,
    /// Release date (Unix timestamp)
    #[serde(default)]
    pub date: i64,
    /// Disc number
    #[serde(default = "default_disc")]
    pub disc: i32,
    /// Duration in seconds
    #[serde(default)]
    pub duration: i32,
    /// File path
    pub filepath: String,
    /// Folder path
    #[serde(default)]
    pub folder: String,
    /// Track title
    pub title: String,
    /// Track number
    #[serde(default)]
    pub track: i32,
    /// Unique track hash
    #[serde(default)]
    pub trackhash: String,
    /// List of artist hashes
    #[serde(default)]
    pub artisthashes: Vec<String>,
    /// Image path
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub image: String,
}

fn default_disc() -> i32 {
    1
}

impl Track {
    /// Create a new track with default values
    pub fn new() -> Self {
        Self {
            id: 0,
            album: String::new(),
            albumartists: Vec::new(),
            albumhash: String::new(),
            artists: Vec::new(),
            bitrate: 0,
            date: 0,
            disc: 1,
            duration: 0,
            filepath: String::new(),
            folder: String::new(),
            title: String::new(),
            track: 0,
            trackhash: String::new(),
            artisthashes: Vec::new(),
            image: String::new(),
        }
    }

    /// Get artist as a comma-separated string
    pub fn artist(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Get album artist as a comma-separated string
    pub fn albumartist(&self) -> String {
        self.albumartists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Compute artist hashes from artists list
    pub fn compute_artisthashes(&mut self) {
        self.artisthashes = self.artists.iter().map(|a| a.artisthash.clone()).collect();
    }

    /// Every artist identity this track belongs to, track artists first
    pub fn all_artisthashes(&self) -> Vec<&str> {
        let mut hashes: Vec<&str> = Vec::new();
        let candidates = self
            .artisthashes
            .iter()
            .map(String::as_str)
            .chain(self.artists.iter().map(|a| a.artisthash.as_str()))
            .chain(self.albumartists.iter().map(|a| a.artisthash.as_str()));

        for hash in candidates {
            if !hash.is_empty() && !hashes.contains(&hash) {
                hashes.push(hash);
            }
        }

        hashes
    }

    /// Get disc and track as a sortable position
    pub fn sort_position(&self) -> i32 {
        self.disc * 1000 + self.track
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::new()
    }
}
