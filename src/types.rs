use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Face bounding box reported by the front-end face detector, in frame pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    pub tracking_id: Option<i32>,
}

impl FaceBox {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
            tracking_id: None,
        }
    }

    pub fn with_tracking_id(mut self, id: i32) -> Self {
        self.tracking_id = Some(id);
        self
    }
}

/// Cropped, rotated face capture written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapturedPhoto {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Size of the frame before cropping
    pub source_width: u32,
    pub source_height: u32,
    pub captured_at: chrono::DateTime<chrono::Utc>,
}

/// Camera device as listed by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraDeviceInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba_string(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

impl From<image::Rgba<u8>> for Rgba8 {
    fn from(p: image::Rgba<u8>) -> Self {
        Self::new(p[0], p[1], p[2], p[3])
    }
}

impl From<Rgba8> for image::Rgba<u8> {
    fn from(c: Rgba8) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_string_format() {
        let c = Rgba8::new(200, 150, 120, 255);
        assert_eq!(c.to_rgba_string(), "rgba(200,150,120,255)");
    }
}
