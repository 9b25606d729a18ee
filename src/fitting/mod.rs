//! Garment overlay preview
//!
//! Places product images over the avatar for the fitting room. The vertical
//! shift comes from a fixed lookup on the garment type, never from the
//! garment's own geometry. Previews are rendered on demand and not saved.

use crate::errors::AvatarError;
use image::{imageops, RgbaImage};

/// Shift applied to upper-body garments (negative is up)
pub const UPPER_BODY_OFFSET: i32 = -80;
/// Shift applied to dresses
pub const DRESS_OFFSET: i32 = 40;
/// Default edge length of a garment slot
pub const DEFAULT_DISPLAY_SIZE: u32 = 150;

/// Type strings shifted by `UPPER_BODY_OFFSET`, matched trimmed and case-insensitively
pub const UPPER_BODY_TYPES: &[&str] = &[
    "top",
    "tops",
    "shirt",
    "t-shirt",
    "blouse",
    "jacket",
    "coat",
    "hoodie",
    "sweater",
    "outerwear",
];
/// Type strings shifted by `DRESS_OFFSET`
pub const DRESS_TYPES: &[&str] = &["dress", "dresses"];

/// Vertical offset for a garment type string. Unknown types are not shifted.
pub fn garment_offset(garment_type: &str) -> i32 {
    let key = garment_type.trim().to_ascii_lowercase();
    if UPPER_BODY_TYPES.contains(&key.as_str()) {
        UPPER_BODY_OFFSET
    } else if DRESS_TYPES.contains(&key.as_str()) {
        DRESS_OFFSET
    } else {
        0
    }
}

/// Square slot a garment is drawn into, in avatar pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GarmentPlacement {
    pub x: i64,
    pub y: i64,
    pub size: u32,
    pub offset: i32,
}

/// Center a `display_size` slot on the avatar and apply the type offset
pub fn place_garment(avatar_w: u32, avatar_h: u32, garment_type: &str, display_size: u32) -> GarmentPlacement {
    let offset = garment_offset(garment_type);
    GarmentPlacement {
        x: (avatar_w as i64 - display_size as i64) / 2,
        y: (avatar_h as i64 - display_size as i64) / 2 + offset as i64,
        size: display_size,
        offset,
    }
}

/// A garment selected for the preview
#[derive(Debug, Clone)]
pub struct GarmentLayer {
    pub garment_type: String,
    pub image: RgbaImage,
}

/// Draw each garment, in order, fitted into its slot over a copy of the avatar
pub fn render_fitting_preview(
    avatar: &RgbaImage,
    garments: &[GarmentLayer],
    display_size: u32,
) -> Result<(RgbaImage, Vec<GarmentPlacement>), AvatarError> {
    if display_size == 0 {
        return Err(AvatarError::ImageError(
            "Garment display size must be positive".to_string(),
        ));
    }

    let mut canvas = avatar.clone();
    let mut placements = Vec::with_capacity(garments.len());

    for garment in garments {
        let slot = place_garment(
            canvas.width(),
            canvas.height(),
            &garment.garment_type,
            display_size,
        );
        if garment.image.width() == 0 || garment.image.height() == 0 {
            log::warn!("Skipping empty {} image", garment.garment_type);
            continue;
        }

        let fitted = fit_within(&garment.image, display_size);
        let x = slot.x + (display_size as i64 - fitted.width() as i64) / 2;
        let y = slot.y + (display_size as i64 - fitted.height() as i64) / 2;
        imageops::overlay(&mut canvas, &fitted, x, y);

        log::debug!(
            "Placed {} at ({}, {}) offset {}",
            garment.garment_type,
            x,
            y,
            slot.offset
        );
        placements.push(slot);
    }

    Ok((canvas, placements))
}

/// Scale so the longer edge equals `size`, keeping the aspect ratio
fn fit_within(source: &RgbaImage, size: u32) -> RgbaImage {
    let (w, h) = source.dimensions();
    let scale = size as f32 / w.max(h) as f32;
    let fw = ((w as f32 * scale).round() as u32).clamp(1, size);
    let fh = ((h as f32 * scale).round() as u32).clamp(1, size);
    imageops::resize(source, fw, fh, imageops::FilterType::Triangle)
}

/// Download and decode a product image
pub async fn fetch_garment_image(client: &reqwest::Client, url: &str) -> Result<RgbaImage, AvatarError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let bytes = response.bytes().await?;
    let img = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_offset_lookup_is_case_insensitive() {
        assert_eq!(garment_offset("  Tops "), UPPER_BODY_OFFSET);
        assert_eq!(garment_offset("DRESS"), DRESS_OFFSET);
        assert_eq!(garment_offset("pants"), 0);
    }

    #[test]
    fn test_slot_is_centered() {
        let slot = place_garment(300, 600, "shoes", 150);
        assert_eq!((slot.x, slot.y), (75, 225));
        let slot = place_garment(300, 600, "jacket", 150);
        assert_eq!(slot.y, 225 - 80);
    }

    #[test]
    fn test_wide_garment_keeps_aspect() {
        let avatar = RgbaImage::from_pixel(300, 600, Rgba([0, 0, 0, 0]));
        let garment = GarmentLayer {
            garment_type: "skirt".to_string(),
            image: RgbaImage::from_pixel(200, 100, Rgba([0, 0, 255, 255])),
        };
        let (out, placements) = render_fitting_preview(&avatar, &[garment], 150).unwrap();
        assert_eq!(placements.len(), 1);
        // 150x75 centered in the slot at (75, 225): rows 262..337
        assert_eq!(out.get_pixel(150, 300)[2], 255);
        assert_eq!(out.get_pixel(150, 250)[3], 0);
    }

    #[test]
    fn test_zero_display_size_rejected() {
        let avatar = RgbaImage::new(10, 10);
        assert!(render_fitting_preview(&avatar, &[], 0).is_err());
    }
}
