use crate::camera::{list_cameras, FaceCamera, FrameSource};
use crate::capture::{capture_face_photo, FaceGate, FaceGateStatus};
use crate::commands::config::current_config;
use crate::types::{CameraDeviceInfo, CapturedPhoto, FaceBox};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex as SyncMutex};
use tauri::command;
use tokio::sync::RwLock;

// Async map, sync lock per camera (frames are grabbed on the blocking pool)
lazy_static::lazy_static! {
    static ref CAMERA_REGISTRY: Arc<RwLock<HashMap<String, Arc<SyncMutex<FaceCamera>>>>> = Arc::new(RwLock::new(HashMap::new()));
}

/// List cameras available for face capture
#[command]
pub async fn get_available_cameras() -> Result<Vec<CameraDeviceInfo>, String> {
    tokio::task::spawn_blocking(list_cameras)
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| {
            log::error!("Failed to list cameras: {}", e);
            e.to_string()
        })
}

/// Tell the front-end whether the shutter should be enabled for these faces
#[command]
pub async fn evaluate_faces(
    frame_width: u32,
    frame_height: u32,
    faces: Vec<FaceBox>,
) -> Result<FaceGateStatus, String> {
    let config = current_config()?;
    let gate = FaceGate::from(&config.camera);
    Ok(gate.evaluate(frame_width, frame_height, &faces))
}

/// Grab a frame and save the centered, rotated face crop
#[command]
pub async fn capture_face(
    device_id: Option<String>,
    faces: Vec<FaceBox>,
) -> Result<CapturedPhoto, String> {
    let config = current_config()?;
    let camera_id = device_id.unwrap_or_else(|| config.camera.device_id.clone());
    log::info!("Capturing face photo from camera {}", camera_id);

    let camera = get_or_create_camera(camera_id, config.camera.warmup_frames).await?;
    let gate = FaceGate::from(&config.camera);
    let crop_ratio = config.camera.crop_ratio;
    let output_dir = PathBuf::from(&config.storage.capture_dir);

    let result = tokio::task::spawn_blocking(move || {
        let mut camera_guard = camera.lock().map_err(|_| "Mutex poisoned".to_string())?;
        let frame = camera_guard.grab_frame().map_err(|e| e.to_string())?;
        capture_face_photo(&frame, &faces, &gate, crop_ratio, &output_dir).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?;

    match result {
        Ok(photo) => {
            log::info!("Captured {}x{} face photo", photo.width, photo.height);
            Ok(photo)
        }
        Err(e) => {
            log::error!("Error capturing photo: {}", e);
            Err(format!("Error capturing photo: {}", e))
        }
    }
}

/// Stop the stream and forget the camera
#[command]
pub async fn release_camera(device_id: String) -> Result<String, String> {
    let mut registry = CAMERA_REGISTRY.write().await;
    match registry.remove(&device_id) {
        Some(_) => {
            log::info!("Released camera {}", device_id);
            Ok(format!("Camera {} released", device_id))
        }
        None => Ok(format!("Camera {} was not active", device_id)),
    }
}

async fn get_or_create_camera(
    device_id: String,
    warmup_frames: u32,
) -> Result<Arc<SyncMutex<FaceCamera>>, String> {
    {
        let registry = CAMERA_REGISTRY.read().await;
        if let Some(camera) = registry.get(&device_id) {
            return Ok(camera.clone());
        }
    }

    let id = device_id.clone();
    let camera = tokio::task::spawn_blocking(move || FaceCamera::open(&id, warmup_frames))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| {
            log::error!("Failed to open camera {}: {}", device_id, e);
            e.to_string()
        })?;

    let mut registry = CAMERA_REGISTRY.write().await;
    // Another task may have opened it while we were waiting
    let entry = registry
        .entry(device_id)
        .or_insert_with(|| Arc::new(SyncMutex::new(camera)));
    Ok(entry.clone())
}
