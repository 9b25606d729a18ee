//! Background removal through the remote image API.
//!
//! The photo is posted once as base64 JSON; the binary response becomes the
//! canonical face image. There is no retry, backoff or queueing, and a failed
//! call never touches the stored face file.

pub mod store;

pub use store::FaceStore;

use crate::config::BackgroundConfig;
use crate::errors::AvatarError;
use base64::Engine;
use bytes::Bytes;
use std::time::Duration;

/// JSON body expected by the background eraser endpoint
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BackgroundRemovalRequest {
    pub image: String,
    pub return_mask: bool,
    pub invert_mask: bool,
    pub grow_mask: u32,
    pub base64: bool,
}

impl BackgroundRemovalRequest {
    pub fn from_image_bytes(bytes: &[u8]) -> Self {
        Self {
            image: base64::engine::general_purpose::STANDARD.encode(bytes),
            return_mask: false,
            invert_mask: false,
            grow_mask: 0,
            base64: false,
        }
    }
}

/// HTTP client for the background removal service
#[derive(Debug, Clone)]
pub struct BackgroundRemover {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl BackgroundRemover {
    pub fn new(config: &BackgroundConfig) -> Result<Self, AvatarError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        if config.api_key.is_empty() {
            log::warn!("Background removal API key is empty; requests will likely be rejected");
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Send the encoded photo and return the processed image bytes
    pub async fn remove_background(&self, photo: &[u8]) -> Result<Bytes, AvatarError> {
        let payload = BackgroundRemovalRequest::from_image_bytes(photo);
        log::info!(
            "Removing background: {} bytes -> {}",
            photo.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AvatarError::BackgroundRemovalError(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AvatarError::BackgroundRemovalError(format!(
                "Service returned {}",
                status
            )));
        }

        let body = response.bytes().await.map_err(|e| {
            AvatarError::BackgroundRemovalError(format!("Failed to read response: {}", e))
        })?;
        if body.is_empty() {
            return Err(AvatarError::BackgroundRemovalError(
                "Received empty response from background removal API".to_string(),
            ));
        }

        log::info!("Background removed successfully ({} bytes)", body.len());
        Ok(body)
    }

    /// Remove the background of the photo at `photo_path` and store the result.
    ///
    /// The stored face is only written after a successful response.
    pub async fn process_photo(
        &self,
        photo_path: &std::path::Path,
        store: &FaceStore,
    ) -> Result<std::path::PathBuf, AvatarError> {
        let photo = tokio::fs::read(photo_path).await.map_err(|e| {
            AvatarError::StorageError(format!("Failed to read image data {:?}: {}", photo_path, e))
        })?;

        let processed = self.remove_background(&photo).await?;
        store.write(&processed).await
    }
}
