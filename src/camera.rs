//! Camera access for face capture.
//!
//! `FaceCamera` wraps a nokhwa callback camera on the native backend. Capture
//! logic only sees the `FrameSource` trait, so synthetic frames can stand in
//! for hardware in tests.

use crate::errors::AvatarError;
use crate::types::CameraDeviceInfo;
use image::RgbImage;
use nokhwa::{
    pixel_format::RgbFormat,
    query,
    utils::{ApiBackend, CameraIndex, RequestedFormat, RequestedFormatType},
    CallbackCamera,
};

/// Anything that can hand out RGB frames
pub trait FrameSource: Send {
    fn grab_frame(&mut self) -> Result<RgbImage, AvatarError>;
}

/// List cameras visible to the native backend
pub fn list_cameras() -> Result<Vec<CameraDeviceInfo>, AvatarError> {
    let cameras = query(ApiBackend::Auto)
        .map_err(|e| AvatarError::CameraError(format!("Failed to query cameras: {}", e)))?;

    Ok(cameras
        .into_iter()
        .map(|info| CameraDeviceInfo {
            id: info.index().to_string(),
            name: info.human_name(),
            description: info.description().to_string(),
        })
        .collect())
}

/// Native camera used for face capture
pub struct FaceCamera {
    camera: CallbackCamera,
    device_id: String,
    warmup_frames: u32,
    warmed_up: bool,
}

impl FaceCamera {
    pub fn open(device_id: &str, warmup_frames: u32) -> Result<Self, AvatarError> {
        let index = device_id
            .parse::<u32>()
            .map_err(|_| AvatarError::CameraError(format!("Invalid device ID: {}", device_id)))?;

        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestResolution);
        let mut camera = CallbackCamera::new(CameraIndex::Index(index), requested, |_| {})
            .map_err(|e| AvatarError::CameraError(format!("Failed to initialize camera: {}", e)))?;

        camera
            .open_stream()
            .map_err(|e| AvatarError::CameraError(format!("Failed to start stream: {}", e)))?;

        log::info!("Opened camera {}", device_id);
        Ok(Self {
            camera,
            device_id: device_id.to_string(),
            warmup_frames,
            warmed_up: false,
        })
    }

    fn poll_rgb(&mut self) -> Result<RgbImage, AvatarError> {
        let buffer = self
            .camera
            .poll_frame()
            .map_err(|e| AvatarError::CameraError(format!("Failed to capture frame: {}", e)))?;
        let decoded = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| AvatarError::CameraError(format!("Failed to decode frame: {}", e)))?;

        let (width, height) = (decoded.width(), decoded.height());
        RgbImage::from_raw(width, height, decoded.into_raw()).ok_or_else(|| {
            AvatarError::CameraError(format!("Frame buffer does not match {}x{}", width, height))
        })
    }
}

impl FrameSource for FaceCamera {
    fn grab_frame(&mut self) -> Result<RgbImage, AvatarError> {
        // Exposure and focus need a few frames to settle after the stream opens
        if !self.warmed_up {
            for i in 0..self.warmup_frames {
                if let Err(e) = self.poll_rgb() {
                    log::debug!("Warmup frame {} failed (normal during startup): {}", i + 1, e);
                }
                std::thread::sleep(std::time::Duration::from_millis(30));
            }
            self.warmed_up = true;
        }

        self.poll_rgb()
    }
}

impl Drop for FaceCamera {
    fn drop(&mut self) {
        if let Err(e) = self.camera.stop_stream() {
            log::warn!("Failed to stop camera {}: {}", self.device_id, e);
        }
    }
}
