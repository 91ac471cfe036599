//! Artist model

use serde::{Deserialize, Serialize};

/// An artist
///
/// Counters are filled in per request from the artist's current tracks and
/// albums; they are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    /// Artist name
    pub name: String,
    /// Unique artist hash
    pub artisthash: String,
    /// Number of albums
    #[serde(default)]
    pub albumcount: i32,
    /// Number of tracks
    #[serde(default)]
    pub trackcount: i32,
    /// Total duration in seconds
    #[serde(default)]
    pub duration: i32,
    /// Creation date (Unix timestamp)
    #[serde(default)]
    pub created_date: i64,
    /// Image path
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub image: String,
    /// Whether the artist is marked as a favorite
    #[serde(default)]
    pub is_favorite: bool,
}

impl Artist {
    /// Create a new artist
    pub fn new(name: String, artisthash: String) -> Self {
        Self {
            name,
            artisthash,
            albumcount: 0,
            trackcount: 0,
            duration: 0,
            created_date: 0,
            image: String::new(),
            is_favorite: false,
        }
    }

    /// Generate the image path
    pub fn set_image(&mut self) {
        self.image = format!("{}.webp", self.artisthash);
    }

    pub fn set_trackcount(&mut self, count: usize) {
        self.trackcount = i32::try_from(count).unwrap_or(i32::MAX);
    }

    pub fn set_albumcount(&mut self, count: usize) {
        self.albumcount = i32::try_from(count).unwrap_or(i32::MAX);
    }

    pub fn set_duration(&mut self, duration: i64) {
        self.duration = i32::try_from(duration).unwrap_or(i32::MAX);
    }
}

impl Default for Artist {
    fn default() -> Self {
        Self::new(String::new(), String::new())
    }
}

impl PartialEq for Artist {
    fn eq(&self, other: &Self) -> bool {
        self.artisthash == other.artisthash
    }
}

impl Eq for Artist {}

impl std::hash::Hash for Artist {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.artisthash.hash(state);
    }
}
