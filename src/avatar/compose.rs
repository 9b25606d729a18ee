use crate::errors::AvatarError;
use image::{imageops, RgbaImage};

/// Fixed placement of the face cutout on the avatar
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FaceParams {
    /// Face width as a fraction of avatar width
    pub scale: f32,
    /// Top edge as a fraction of avatar height
    pub top_ratio: f32,
}

impl Default for FaceParams {
    fn default() -> Self {
        Self {
            scale: 0.3,
            top_ratio: 0.003,
        }
    }
}

/// Where the face ended up, in avatar pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FacePlacement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

/// Compute the scaled size and offset for a face of `face_w × face_h`
pub fn face_placement(
    avatar_w: u32,
    avatar_h: u32,
    face_w: u32,
    face_h: u32,
    params: FaceParams,
) -> Result<FacePlacement, AvatarError> {
    if face_w == 0 || face_h == 0 {
        return Err(AvatarError::ImageError("Face image is empty".to_string()));
    }

    let factor = (avatar_w as f32 * params.scale) / face_w as f32;
    let scaled_w = face_w as f32 * factor;
    let scaled_h = face_h as f32 * factor;

    Ok(FacePlacement {
        x: ((avatar_w as f32 - scaled_w) / 2.0) as i64,
        y: (avatar_h as f32 * params.top_ratio) as i64,
        width: (scaled_w.round() as u32).max(1),
        height: (scaled_h.round() as u32).max(1),
    })
}

/// Scale the face (aspect preserved, bilinear) and alpha-blend it onto the
/// avatar, centered horizontally near the top.
pub fn composite_face(
    avatar: &mut RgbaImage,
    face: &RgbaImage,
    params: FaceParams,
) -> Result<FacePlacement, AvatarError> {
    let placement = face_placement(
        avatar.width(),
        avatar.height(),
        face.width(),
        face.height(),
        params,
    )?;

    let scaled = imageops::resize(
        face,
        placement.width,
        placement.height,
        imageops::FilterType::Triangle,
    );
    imageops::overlay(avatar, &scaled, placement.x, placement.y);

    log::debug!(
        "Overlaid {}x{} face at ({}, {})",
        placement.width,
        placement.height,
        placement.x,
        placement.y
    );
    Ok(placement)
}
