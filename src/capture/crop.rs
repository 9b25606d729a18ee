//! Centered crop and sensor-orientation rotation for face captures

use crate::errors::AvatarError;
use image::{imageops, GenericImageView, ImageBuffer, Pixel};

/// Pixel rectangle inside a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

/// Centered rectangle covering `ratio` of each dimension, clamped to the image.
///
/// Half-extents are computed with integer division, so an odd box size loses
/// one pixel. A rectangle with no area is rejected.
pub fn center_crop_rect(width: u32, height: u32, ratio: f32) -> Result<CropRect, AvatarError> {
    let (w, h) = (width as i64, height as i64);
    let box_w = (width as f32 * ratio) as i64;
    let box_h = (height as f32 * ratio) as i64;
    let (cx, cy) = (w / 2, h / 2);

    let left = (cx - box_w / 2).max(0);
    let top = (cy - box_h / 2).max(0);
    let right = (cx + box_w / 2).min(w);
    let bottom = (cy + box_h / 2).min(h);

    let crop_w = right - left;
    let crop_h = bottom - top;
    if crop_w <= 0 || crop_h <= 0 {
        return Err(AvatarError::InvalidCrop {
            width: crop_w,
            height: crop_h,
        });
    }

    Ok(CropRect {
        left: left as u32,
        top: top as u32,
        width: crop_w as u32,
        height: crop_h as u32,
    })
}

/// Crop the centered region and rotate it 90° anticlockwise.
///
/// A crop of `w × h` comes back as `h × w`.
pub fn crop_and_rotate<I, P>(
    image: &I,
    ratio: f32,
) -> Result<ImageBuffer<P, Vec<P::Subpixel>>, AvatarError>
where
    I: GenericImageView<Pixel = P> + 'static,
    P: Pixel + 'static,
{
    let (width, height) = image.dimensions();
    let rect = center_crop_rect(width, height, ratio)?;

    let cropped = imageops::crop_imm(image, rect.left, rect.top, rect.width, rect.height).to_image();
    let rotated = imageops::rotate270(&cropped);

    log::debug!(
        "Rotated capture 90 degrees anticlockwise: {}x{} -> {}x{}",
        cropped.width(),
        cropped.height(),
        rotated.width(),
        rotated.height()
    );

    Ok(rotated)
}
