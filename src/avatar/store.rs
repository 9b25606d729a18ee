use crate::config::StorageConfig;
use crate::errors::AvatarError;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Small persistent key-value file shared between screens
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvatarPrefs {
    pub latest_avatar_path: Option<String>,
}

impl AvatarPrefs {
    pub fn load(path: &Path) -> Result<Self, AvatarError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .map_err(|e| AvatarError::StorageError(format!("Failed to read prefs: {}", e)))?;
        toml::from_str(&contents)
            .map_err(|e| AvatarError::StorageError(format!("Failed to parse prefs: {}", e)))
    }

    pub fn save(&self, path: &Path) -> Result<(), AvatarError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string(self)
            .map_err(|e| AvatarError::StorageError(format!("Failed to serialize prefs: {}", e)))?;
        fs::write(path, contents)
            .map_err(|e| AvatarError::StorageError(format!("Failed to write prefs: {}", e)))
    }
}

/// Timestamped avatar files plus the "latest avatar" pointer.
///
/// Writes to the pointer are not coordinated; the last save wins.
#[derive(Debug, Clone)]
pub struct AvatarStore {
    dir: PathBuf,
    prefs_path: PathBuf,
}

pub fn avatar_file_name(timestamp: chrono::DateTime<chrono::Local>) -> String {
    format!("colored_avatar_{}.png", timestamp.format("%Y%m%d_%H%M%S"))
}

impl AvatarStore {
    pub fn new(dir: impl Into<PathBuf>, prefs_path: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefs_path: prefs_path.into(),
        }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(&storage.avatar_dir, &storage.prefs_file)
    }

    /// Write the avatar as PNG and record it as the latest one
    pub fn save(&self, avatar: &RgbaImage) -> Result<PathBuf, AvatarError> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            AvatarError::StorageError(format!("Could not access storage {:?}: {}", self.dir, e))
        })?;

        let path = self.dir.join(avatar_file_name(chrono::Local::now()));
        avatar
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|e| AvatarError::StorageError(format!("Error saving avatar: {}", e)))?;

        let prefs = AvatarPrefs {
            latest_avatar_path: Some(path.to_string_lossy().into_owned()),
        };
        prefs.save(&self.prefs_path)?;

        log::info!("Avatar saved successfully at: {:?}", path);
        Ok(path)
    }

    /// Latest saved avatar, if the recorded file still exists
    pub fn latest_path(&self) -> Option<PathBuf> {
        let prefs = match AvatarPrefs::load(&self.prefs_path) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Ignoring unreadable avatar prefs: {}", e);
                return None;
            }
        };

        prefs
            .latest_avatar_path
            .map(PathBuf::from)
            .filter(|p| p.is_file())
    }

    /// Latest avatar, or the given default when none was saved or it fails to decode
    pub fn load_latest_or(&self, default: impl FnOnce() -> RgbaImage) -> RgbaImage {
        match self.latest_path().map(image::open) {
            Some(Ok(img)) => img.to_rgba8(),
            Some(Err(e)) => {
                log::error!("Error loading avatar: {}", e);
                default()
            }
            None => default(),
        }
    }
}
