//! Synthetic images for offline testing
//!
//! Stand-ins for camera frames, avatar templates and face cutouts, so the
//! pipeline can be exercised without hardware or the remote services.

use crate::camera::FrameSource;
use crate::errors::AvatarError;
use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Gradient frame that changes with `frame_number`
pub fn synthetic_frame(frame_number: u64, width: u32, height: u32) -> RgbImage {
    let base = (frame_number % 256) as u8;
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            base.wrapping_add((x % 256) as u8),
            base.wrapping_add((y % 256) as u8),
            base.wrapping_add(((x + y) % 256) as u8),
        ])
    })
}

/// Template with an opaque white body on a transparent background.
///
/// The body is the middle third horizontally, from 10% to 90% of the
/// height, outlined by a one pixel gray border that must never be recoloured.
pub fn synthetic_template(width: u32, height: u32) -> RgbaImage {
    let (left, right) = (width / 3, width - width / 3);
    let (top, bottom) = (height / 10, height - height / 10);

    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= left && x < right && y >= top && y < bottom;
        let edge = x == left || x + 1 == right || y == top || y + 1 == bottom;
        match (inside, edge) {
            (true, true) => Rgba([128, 128, 128, 255]),
            (true, false) => Rgba([255, 255, 255, 255]),
            _ => Rgba([0, 0, 0, 0]),
        }
    })
}

/// Face cutout: an opaque disc of `skin` on a transparent square
pub fn synthetic_face(size: u32, skin: Rgba<u8>) -> RgbaImage {
    let center = size as f32 / 2.0;
    let radius = center * 0.9;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        if dx * dx + dy * dy <= radius * radius {
            skin
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Frame source that replays synthetic frames of a fixed size
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    pub width: u32,
    pub height: u32,
    frames_served: u64,
}

impl SyntheticCamera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frames_served: 0,
        }
    }

    pub fn frames_served(&self) -> u64 {
        self.frames_served
    }
}

impl FrameSource for SyntheticCamera {
    fn grab_frame(&mut self) -> Result<RgbImage, AvatarError> {
        if self.width == 0 || self.height == 0 {
            return Err(AvatarError::CameraError("Synthetic camera has no frame size".to_string()));
        }
        let frame = synthetic_frame(self.frames_served, self.width, self.height);
        self.frames_served += 1;
        Ok(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_frame_correct_size() {
        let frame = synthetic_frame(0, 640, 480);
        assert_eq!(frame.dimensions(), (640, 480));
    }

    #[test]
    fn test_synthetic_frames_differ() {
        let frame0 = synthetic_frame(0, 32, 24);
        let frame1 = synthetic_frame(1, 32, 24);
        assert_ne!(frame0.get_pixel(0, 0), frame1.get_pixel(0, 0));
    }

    #[test]
    fn test_template_layout() {
        let t = synthetic_template(300, 600);
        assert_eq!(t.get_pixel(150, 300), &Rgba([255, 255, 255, 255]));
        assert_eq!(t.get_pixel(100, 300), &Rgba([128, 128, 128, 255]));
        assert_eq!(t.get_pixel(5, 5)[3], 0);
    }

    #[test]
    fn test_face_center_is_skin() {
        let skin = Rgba([200, 150, 120, 255]);
        let face = synthetic_face(100, skin);
        assert_eq!(face.get_pixel(50, 50), &skin);
        assert_eq!(face.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_synthetic_camera_counts_frames() {
        let mut cam = SyntheticCamera::new(64, 48);
        cam.grab_frame().unwrap();
        cam.grab_frame().unwrap();
        assert_eq!(cam.frames_served(), 2);
        assert!(SyntheticCamera::new(0, 10).grab_frame().is_err());
    }
}
