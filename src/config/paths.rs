//! Filesystem paths used by the service

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Resolved config directory and the files inside it
#[derive(Debug, Clone)]
pub struct Paths {
    config_dir: PathBuf,
}

impl Paths {
    /// Resolve the config directory and create it.
    ///
    /// The directory lives under `config_override` when given, else next to
    /// the executable, else in the platform config location. It is hidden
    /// when it ends up inside the home directory.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_parent = if let Some(path) = config_override {
            path
        } else if let Ok(exe) = std::env::current_exe() {
            exe.parent().unwrap_or(Path::new(".")).to_path_buf()
        } else {
            directories::ProjectDirs::from("", "", "swingmusic")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        };

        let config_dir_name = if is_home_dir(&config_parent) {
            ".swingmusic"
        } else {
            "swingmusic"
        };

        let paths = Self {
            config_dir: config_parent.join(config_dir_name),
        };

        std::fs::create_dir_all(&paths.config_dir).with_context(|| {
            format!("Failed to create config directory {}", paths.config_dir.display())
        })?;

        Ok(paths)
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Library database
    pub fn app_db_path(&self) -> PathBuf {
        self.config_dir.join("swingmusic.db")
    }

    /// User settings file
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

fn is_home_dir(path: &Path) -> bool {
    directories::UserDirs::new()
        .map(|dirs| path.starts_with(dirs.home_dir()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp = TempDir::new().unwrap();
        let paths = Paths::new(Some(temp.path().to_path_buf())).unwrap();

        assert!(paths.config_dir().starts_with(temp.path()));
        assert!(paths.config_dir().is_dir());
        assert_eq!(paths.app_db_path().parent(), Some(paths.config_dir()));
        assert!(paths.settings_path().ends_with("settings.json"));
    }
}
