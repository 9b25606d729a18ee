//! Configuration management for avatarfit
//!
//! Provides configuration loading, saving, and management for the capture
//! gate, background removal service, storage locations, avatar rendering and
//! the remote catalog database.

use crate::errors::AvatarError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarFitConfig {
    pub camera: CameraConfig,
    pub background: BackgroundConfig,
    pub storage: StorageConfig,
    pub avatar: AvatarConfig,
    pub fitting: FittingConfig,
    pub catalog: CatalogConfig,
}

/// Camera and face-gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Default camera device id (front camera is usually "0")
    pub device_id: String,
    /// Frames smaller than this are ignored by the face gate
    pub min_frame_width: u32,
    pub min_frame_height: u32,
    /// Minimum face bounding box edge in pixels
    pub min_face_size: u32,
    /// Fraction of width/height kept by the centered crop
    pub crop_ratio: f32,
    /// Frames discarded before the real grab
    pub warmup_frames: u32,
}

/// Remote background removal service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub endpoint: String,
    /// Sent as the `x-api-key` header. Usually supplied through
    /// `AVATARFIT_BACKGROUND__API_KEY` rather than the file.
    pub api_key: String,
    pub timeout_secs: u64,
}

/// Storage and file management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Where cropped captures are written
    pub capture_dir: String,
    /// Directory holding the canonical background-removed face
    pub face_dir: String,
    pub face_file_name: String,
    /// Optional shared copy of the face image
    pub gallery_dir: Option<String>,
    /// Directory for timestamped composed avatars
    pub avatar_dir: String,
    /// Key-value file recording the latest avatar path
    pub prefs_file: String,
}

/// Avatar recolouring and face compositing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    /// Custom template; the bundled silhouette is used when unset
    pub template_path: Option<String>,
    /// Each RGB channel must exceed this to be recoloured
    pub white_threshold: u8,
    /// Alpha must exceed this to be recoloured
    pub alpha_threshold: u8,
    /// Face width as a fraction of avatar width
    pub face_scale: f32,
    /// Face top edge as a fraction of avatar height
    pub face_top_ratio: f32,
}

/// Garment overlay preview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittingConfig {
    /// Edge length of the square slot each garment is drawn into
    pub display_size: u32,
}

/// Product/user database (Firebase Realtime Database REST API)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub database_url: String,
    /// Node holding products; empty means the database root
    pub products_path: String,
    pub users_path: String,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AvatarFitConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig {
                device_id: "0".to_string(),
                min_frame_width: 480,
                min_frame_height: 360,
                min_face_size: 100,
                crop_ratio: 0.7,
                warmup_frames: 5,
            },
            background: BackgroundConfig {
                endpoint: "https://api.segmind.com/v1/background-eraser".to_string(),
                api_key: String::new(),
                timeout_secs: 60,
            },
            storage: StorageConfig {
                capture_dir: "./captures".to_string(),
                face_dir: "./Pictures/FaceAuth".to_string(),
                face_file_name: "user-face.png".to_string(),
                gallery_dir: None,
                avatar_dir: "./Avatars".to_string(),
                prefs_file: "./avatar_prefs.toml".to_string(),
            },
            avatar: AvatarConfig {
                template_path: None,
                white_threshold: 240,
                alpha_threshold: 200,
                face_scale: 0.3,
                face_top_ratio: 0.003,
            },
            fitting: FittingConfig { display_size: 150 },
            catalog: CatalogConfig {
                database_url: "https://localhost.firebasedatabase.app".to_string(),
                products_path: String::new(),
                users_path: "users".to_string(),
                auth_token: None,
                timeout_secs: 30,
            },
        }
    }
}

impl AvatarFitConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AvatarError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            AvatarError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: AvatarFitConfig = toml::from_str(&contents).map_err(|e| {
            AvatarError::ConfigError(format!("Failed to parse config file: {}", e))
        })?;

        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Load defaults, then the TOML file (if present), then `AVATARFIT_*`
    /// environment overrides such as `AVATARFIT_BACKGROUND__API_KEY`.
    pub fn load_layered<P: AsRef<Path>>(path: P) -> Result<Self, AvatarError> {
        let defaults = toml::to_string(&Self::default())
            .map_err(|e| AvatarError::ConfigError(format!("Invalid defaults: {}", e)))?;

        let settings = config::Config::builder()
            .add_source(config::File::from_str(&defaults, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix("AVATARFIT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AvatarError::ConfigError(format!("Failed to build config: {}", e)))?;

        settings
            .try_deserialize()
            .map_err(|e| AvatarError::ConfigError(format!("Failed to deserialize config: {}", e)))
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), AvatarError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AvatarError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(|e| {
            AvatarError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, toml_string).map_err(|e| {
            AvatarError::ConfigError(format!("Failed to write config file: {}", e))
        })?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("avatarfit.toml")
    }

    /// Load from default location (with env overrides) or fall back to defaults
    pub fn load_or_default() -> Self {
        Self::load_layered(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Full path of the canonical background-removed face image
    pub fn face_path(&self) -> PathBuf {
        Path::new(&self.storage.face_dir).join(&self.storage.face_file_name)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.camera.min_frame_width == 0 || self.camera.min_frame_height == 0 {
            return Err("Invalid minimum frame size".to_string());
        }
        if !(self.camera.crop_ratio > 0.0 && self.camera.crop_ratio <= 1.0) {
            return Err("Crop ratio must be in (0.0, 1.0]".to_string());
        }

        if self.background.endpoint.is_empty() {
            return Err("Background removal endpoint must be set".to_string());
        }
        if self.background.timeout_secs == 0 {
            return Err("Background removal timeout must be positive".to_string());
        }

        if self.storage.face_file_name.is_empty() {
            return Err("Face file name must be set".to_string());
        }

        if !(self.avatar.face_scale > 0.0 && self.avatar.face_scale <= 1.0) {
            return Err("Face scale must be in (0.0, 1.0]".to_string());
        }
        if !(0.0..1.0).contains(&self.avatar.face_top_ratio) {
            return Err("Face top ratio must be in [0.0, 1.0)".to_string());
        }

        if self.fitting.display_size == 0 {
            return Err("Garment display size must be positive".to_string());
        }

        if self.catalog.database_url.is_empty() {
            return Err("Catalog database URL must be set".to_string());
        }

        Ok(())
    }
}
