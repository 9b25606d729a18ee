use crate::background::{BackgroundRemover, FaceStore};
use crate::commands::config::current_config;
use std::path::PathBuf;
use tauri::command;

/// Send a captured photo to the background removal service and store the cutout.
///
/// Returns the path of the stored face image. On failure the previously
/// stored face (if any) is kept.
#[command]
pub async fn remove_photo_background(photo_path: String) -> Result<String, String> {
    let config = current_config()?;
    let remover = BackgroundRemover::new(&config.background).map_err(|e| e.to_string())?;
    let store = FaceStore::from_config(&config.storage);

    log::info!("Removing background from {}", photo_path);
    match remover.process_photo(&PathBuf::from(&photo_path), &store).await {
        Ok(path) => Ok(path.to_string_lossy().into_owned()),
        Err(e) => {
            log::error!("Background removal failed: {}", e);
            Err(format!("Failed to process image: {}", e))
        }
    }
}

/// Capture a face photo, then remove its background in one step
#[command]
pub async fn capture_and_process_face(
    device_id: Option<String>,
    faces: Vec<crate::types::FaceBox>,
) -> Result<String, String> {
    let photo = super::capture::capture_face(device_id, faces).await?;
    remove_photo_background(photo.path.to_string_lossy().into_owned()).await
}

/// Whether a background-removed face is available for avatar building
#[command]
pub async fn has_user_face() -> Result<bool, String> {
    let config = current_config()?;
    Ok(FaceStore::from_config(&config.storage).exists())
}
