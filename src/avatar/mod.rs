//! Avatar personalisation
//!
//! Builds the user's avatar from the bundled body template:
//! 1. Sample the center pixel of the background-removed face as skin tone
//! 2. Recolour the template's near-white body area with that tone
//! 3. Alpha-composite the face cutout near the top of the body
//! 4. Persist the result and remember it as the latest avatar

pub mod color;
pub mod compose;
pub mod recolor;
pub mod store;

pub use color::{sample_center_color, sample_center_color_from_file, DominantColor};
pub use compose::{composite_face, face_placement, FaceParams, FacePlacement};
pub use recolor::{recolor_template, RecolorThresholds};
pub use store::{AvatarPrefs, AvatarStore};

use crate::config::AvatarConfig;
use crate::errors::AvatarError;
use image::RgbaImage;
use std::path::{Path, PathBuf};

const DEFAULT_TEMPLATE_PNG: &[u8] = include_bytes!("../../assets/human_avatar_default.png");

/// Decode the bundled body silhouette
pub fn default_template() -> Result<RgbaImage, AvatarError> {
    let img = image::load_from_memory_with_format(DEFAULT_TEMPLATE_PNG, image::ImageFormat::Png)?;
    Ok(img.to_rgba8())
}

/// Load a template from disk, falling back to the bundled one when `path` is unset
pub fn load_template(path: Option<&Path>) -> Result<RgbaImage, AvatarError> {
    match path {
        Some(p) => {
            let img = image::open(p).map_err(|e| {
                AvatarError::ImageError(format!("Failed to load template {:?}: {}", p, e))
            })?;
            Ok(img.to_rgba8())
        }
        None => default_template(),
    }
}

/// Outcome of building an avatar preview
#[derive(Debug, Clone)]
pub struct BuiltAvatar {
    pub image: RgbaImage,
    /// `None` when no face was available and the plain template was used
    pub color: Option<DominantColor>,
    pub recolored_pixels: usize,
    pub face: Option<FacePlacement>,
}

impl BuiltAvatar {
    /// False for the plain-template fallback, which is for display only
    pub fn is_personalised(&self) -> bool {
        self.color.is_some()
    }

    pub fn color_label(&self) -> String {
        match self.color {
            Some(c) => c.to_rgba_string(),
            None => "Error: Image not found".to_string(),
        }
    }
}

/// Assembles a personalised avatar from a template and a face cutout
#[derive(Debug, Clone)]
pub struct AvatarBuilder {
    template_path: Option<PathBuf>,
    face_path: PathBuf,
    thresholds: RecolorThresholds,
    face_params: FaceParams,
}

impl AvatarBuilder {
    pub fn new(face_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: None,
            face_path: face_path.into(),
            thresholds: RecolorThresholds::default(),
            face_params: FaceParams::default(),
        }
    }

    pub fn from_config(config: &AvatarConfig, face_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: config.template_path.as_ref().map(PathBuf::from),
            face_path: face_path.into(),
            thresholds: RecolorThresholds {
                white: config.white_threshold,
                alpha: config.alpha_threshold,
            },
            face_params: FaceParams {
                scale: config.face_scale,
                top_ratio: config.face_top_ratio,
            },
        }
    }

    pub fn with_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(path.into());
        self
    }

    /// Build the avatar.
    ///
    /// A missing face file is not an error: the plain template comes back.
    /// If the face cannot be composited after recolouring, the recoloured
    /// avatar is still returned.
    pub fn build(&self) -> Result<BuiltAvatar, AvatarError> {
        let mut avatar = load_template(self.template_path.as_deref())?;

        if !self.face_path.is_file() {
            log::warn!(
                "User face image not found at {:?}, returning default avatar",
                self.face_path
            );
            return Ok(BuiltAvatar {
                image: avatar,
                color: None,
                recolored_pixels: 0,
                face: None,
            });
        }

        let face = image::open(&self.face_path)
            .map_err(|e| AvatarError::ImageError(format!("Error analyzing image: {}", e)))?
            .to_rgba8();
        let color = sample_center_color(&face)?;
        log::info!("Detected color {}", color.to_rgba_string());

        let recolored_pixels = recolor_template(&mut avatar, color, self.thresholds);

        let placement = match composite_face(&mut avatar, &face, self.face_params) {
            Ok(p) => {
                log::debug!("Successfully overlaid user face onto avatar");
                Some(p)
            }
            Err(e) => {
                log::error!("Error overlaying user face: {}", e);
                None
            }
        };

        Ok(BuiltAvatar {
            image: avatar,
            color: Some(color),
            recolored_pixels,
            face: placement,
        })
    }
}

/// Encode an image as PNG bytes for transport to the front-end
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, AvatarError> {
    let mut out = std::io::Cursor::new(Vec::new());
    image.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_has_recolourable_area() {
        let template = default_template().unwrap();
        assert_eq!(template.dimensions(), (300, 600));
        let thresholds = RecolorThresholds::default();
        assert!(template.pixels().any(|p| thresholds.qualifies(&p.0)));
    }

    #[test]
    fn test_missing_face_returns_template() {
        let dir = tempfile::tempdir().unwrap();
        let built = AvatarBuilder::new(dir.path().join("user-face.png")).build().unwrap();
        assert!(built.color.is_none());
        assert!(!built.is_personalised());
        assert_eq!(built.image, default_template().unwrap());
        assert_eq!(built.color_label(), "Error: Image not found");
    }

    #[test]
    fn test_encode_png_round_trips_dimensions() {
        let img = RgbaImage::new(3, 2);
        let bytes = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }
}
