//! User settings stored in settings.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use super::Paths;

/// User configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Number of artists whose pages are kept cached
    #[serde(default = "default_artist_cache_size")]
    pub artist_cache_size: usize,

    /// Tracks shown on an artist summary when no limit is requested
    #[serde(default = "default_page_limit")]
    pub artist_track_limit: usize,

    /// Albums per group on an artist page when no limit is requested
    #[serde(default = "default_page_limit")]
    pub artist_album_limit: usize,

    /// Show albums as singles
    #[serde(default)]
    pub show_albums_as_singles: bool,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            artist_cache_size: default_artist_cache_size(),
            artist_track_limit: default_page_limit(),
            artist_album_limit: default_page_limit(),
            show_albums_as_singles: false,
        }
    }
}

impl UserConfig {
    /// Load configuration from file, writing the defaults when it is missing
    pub fn load(paths: &Paths) -> Result<Self> {
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(paths)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, paths: &Paths) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(paths.settings_path(), content).context("Failed to write settings file")?;
        Ok(())
    }

    /// Cache capacity; zero is treated as one
    pub fn cache_capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.artist_cache_size).unwrap_or(NonZeroUsize::MIN)
    }
}

fn default_artist_cache_size() -> usize {
    16
}

fn default_page_limit() -> usize {
    6
}
