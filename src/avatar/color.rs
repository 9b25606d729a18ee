use crate::errors::AvatarError;
use crate::types::Rgba8;
use image::RgbaImage;
use std::path::Path;

/// Skin tone stand-in: the color of the single center pixel of the face cutout
pub type DominantColor = Rgba8;

/// Read the pixel at `(width / 2, height / 2)`. No averaging.
pub fn sample_center_color(image: &RgbaImage) -> Result<DominantColor, AvatarError> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AvatarError::ImageError(
            "Cannot sample the center of an empty image".to_string(),
        ));
    }

    Ok(Rgba8::from(*image.get_pixel(width / 2, height / 2)))
}

pub fn sample_center_color_from_file(path: &Path) -> Result<DominantColor, AvatarError> {
    let img = image::open(path)
        .map_err(|e| AvatarError::ImageError(format!("Failed to decode {:?}: {}", path, e)))?;
    sample_center_color(&img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_center_pixel_is_read() {
        let mut img = RgbaImage::from_pixel(5, 4, Rgba([0, 0, 0, 0]));
        img.put_pixel(2, 2, Rgba([10, 20, 30, 40]));
        assert_eq!(sample_center_color(&img).unwrap(), Rgba8::new(10, 20, 30, 40));
    }

    #[test]
    fn test_empty_image_is_an_error() {
        assert!(sample_center_color(&RgbaImage::new(0, 3)).is_err());
    }
}
