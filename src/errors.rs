use thiserror::Error;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Camera error: {0}")]
    CameraError(String),
    #[error("Capture error: {0}")]
    CaptureError(String),
    #[error("Invalid crop rectangle: {width}x{height}")]
    InvalidCrop { width: i64, height: i64 },
    #[error("Image error: {0}")]
    ImageError(String),
    #[error("Background removal failed: {0}")]
    BackgroundRemovalError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Catalog error: {0}")]
    CatalogError(String),
    #[error("Task join error: {0}")]
    TaskError(String),
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<image::ImageError> for AvatarError {
    fn from(e: image::ImageError) -> Self {
        AvatarError::ImageError(e.to_string())
    }
}

impl From<tokio::task::JoinError> for AvatarError {
    fn from(e: tokio::task::JoinError) -> Self {
        AvatarError::TaskError(e.to_string())
    }
}
