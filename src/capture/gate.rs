//! Face gate: decides whether the shutter is enabled for the current frame.
//!
//! The detector itself runs in the front-end; this only filters the boxes it
//! reports so that tiny frames and far-away faces never enable capture.

use crate::config::CameraConfig;
use crate::types::FaceBox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FaceGate {
    pub min_frame_width: u32,
    pub min_frame_height: u32,
    pub min_face_size: u32,
}

impl Default for FaceGate {
    fn default() -> Self {
        Self {
            min_frame_width: 480,
            min_frame_height: 360,
            min_face_size: 100,
        }
    }
}

impl From<&CameraConfig> for FaceGate {
    fn from(config: &CameraConfig) -> Self {
        Self {
            min_frame_width: config.min_frame_width,
            min_frame_height: config.min_frame_height,
            min_face_size: config.min_face_size,
        }
    }
}

/// Result of running the gate on one analysed frame
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FaceGateStatus {
    pub capture_enabled: bool,
    pub valid_faces: Vec<FaceBox>,
    pub rejected_faces: usize,
    pub message: String,
}

impl FaceGate {
    /// Faces large enough for a usable capture. Frames below the minimum
    /// size yield no faces at all.
    pub fn valid_faces(&self, frame_width: u32, frame_height: u32, faces: &[FaceBox]) -> Vec<FaceBox> {
        if frame_width < self.min_frame_width || frame_height < self.min_frame_height {
            log::warn!(
                "Frame too small for reliable face detection: {}x{}",
                frame_width,
                frame_height
            );
            return Vec::new();
        }

        faces
            .iter()
            .filter(|face| {
                let large_enough =
                    face.width >= self.min_face_size && face.height >= self.min_face_size;
                if !large_enough {
                    log::debug!(
                        "Face too small for accurate detection: {}x{}",
                        face.width,
                        face.height
                    );
                }
                large_enough
            })
            .copied()
            .collect()
    }

    pub fn capture_enabled(&self, frame_width: u32, frame_height: u32, faces: &[FaceBox]) -> bool {
        !self.valid_faces(frame_width, frame_height, faces).is_empty()
    }

    pub fn evaluate(&self, frame_width: u32, frame_height: u32, faces: &[FaceBox]) -> FaceGateStatus {
        let valid_faces = self.valid_faces(frame_width, frame_height, faces);
        let capture_enabled = !valid_faces.is_empty();
        let message = if capture_enabled {
            "Face detected! Center your face and take a photo".to_string()
        } else {
            "No face detected".to_string()
        };

        FaceGateStatus {
            capture_enabled,
            rejected_faces: faces.len() - valid_faces.len(),
            valid_faces,
            message,
        }
    }
}
