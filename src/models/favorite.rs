//! Favorite model

use serde::{Deserialize, Serialize};

/// Favorite type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteType {
    Track,
    Album,
    Artist,
}

impl FavoriteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteType::Track => "track",
            FavoriteType::Album => "album",
            FavoriteType::Artist => "artist",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "track" => Some(FavoriteType::Track),
            "album" => Some(FavoriteType::Album),
            "artist" => Some(FavoriteType::Artist),
            _ => None,
        }
    }
}

impl std::fmt::Display for FavoriteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A favorite entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    /// Database ID
    pub id: i64,
    /// Item hash (trackhash, albumhash, or artisthash)
    pub hash: String,
    /// Type of favorite
    #[serde(rename = "type")]
    pub favorite_type: FavoriteType,
    /// Timestamp when favorited
    pub timestamp: i64,
}

impl Favorite {
    /// Create a new favorite
    pub fn new(hash: String, favorite_type: FavoriteType) -> Self {
        Self {
            id: 0,
            hash,
            favorite_type,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}
