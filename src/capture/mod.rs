//! Face capture: gate the shutter on detected faces, crop the centered region,
//! correct the sensor orientation and write the result as PNG.

pub mod crop;
pub mod gate;

pub use crop::{center_crop_rect, crop_and_rotate, CropRect};
pub use gate::{FaceGate, FaceGateStatus};

use crate::errors::AvatarError;
use crate::types::{CapturedPhoto, FaceBox};
use image::RgbImage;
use std::fs;
use std::path::Path;

/// File name used for a capture taken at `timestamp`
pub fn capture_file_name(timestamp: chrono::DateTime<chrono::Local>) -> String {
    format!("FACE_{}.png", timestamp.format("%Y%m%d_%H%M%S"))
}

/// Crop, rotate and save one frame.
///
/// Refuses to run unless the gate accepts at least one of `faces`. Nothing is
/// retried; a failed crop or write is reported to the caller.
pub fn capture_face_photo(
    frame: &RgbImage,
    faces: &[FaceBox],
    gate: &FaceGate,
    crop_ratio: f32,
    output_dir: &Path,
) -> Result<CapturedPhoto, AvatarError> {
    let (source_width, source_height) = frame.dimensions();
    log::debug!("Starting center area photo capture process");

    if !gate.capture_enabled(source_width, source_height, faces) {
        return Err(AvatarError::CaptureError(
            "No face detected. Please position your face in the frame".to_string(),
        ));
    }

    let rotated = crop_and_rotate(frame, crop_ratio)?;

    fs::create_dir_all(output_dir).map_err(|e| {
        AvatarError::StorageError(format!("Failed to create capture directory: {}", e))
    })?;

    let now = chrono::Local::now();
    let path = output_dir.join(capture_file_name(now));
    rotated
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| AvatarError::StorageError(format!("Failed to save face image: {}", e)))?;

    log::info!(
        "Face image saved to {:?} ({}x{})",
        path,
        rotated.width(),
        rotated.height()
    );

    Ok(CapturedPhoto {
        path,
        width: rotated.width(),
        height: rotated.height(),
        source_width,
        source_height,
        captured_at: now.with_timezone(&chrono::Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_capture_file_name_format() {
        let ts = chrono::Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(capture_file_name(ts), "FACE_20240309_070501.png");
    }

    #[test]
    fn test_capture_refused_without_face() {
        let dir = tempfile::tempdir().unwrap();
        let frame = RgbImage::new(640, 480);
        let result = capture_face_photo(&frame, &[], &FaceGate::default(), 0.7, dir.path());
        assert!(matches!(result, Err(AvatarError::CaptureError(_))));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
