//! Skin-tone recolouring of the avatar template.
//!
//! Near-white, mostly opaque pixels mark the recolourable body area. Every
//! pixel is visited once; the template size bounds the cost.

use crate::types::Rgba8;
use image::RgbaImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecolorThresholds {
    /// Each of R, G and B must be strictly above this
    pub white: u8,
    /// Alpha must be strictly above this
    pub alpha: u8,
}

impl Default for RecolorThresholds {
    fn default() -> Self {
        Self {
            white: 240,
            alpha: 200,
        }
    }
}

impl RecolorThresholds {
    #[inline]
    pub fn qualifies(&self, px: &[u8]) -> bool {
        px[0] > self.white && px[1] > self.white && px[2] > self.white && px[3] > self.alpha
    }
}

/// Replace the RGB of every qualifying pixel with `color`, keeping its alpha.
/// Returns the number of pixels replaced.
pub fn recolor_template(template: &mut RgbaImage, color: Rgba8, thresholds: RecolorThresholds) -> usize {
    let mut replaced = 0;
    for px in template.pixels_mut() {
        if thresholds.qualifies(&px.0) {
            px.0 = [color.r, color.g, color.b, px.0[3]];
            replaced += 1;
        }
    }
    log::debug!(
        "Recoloured {} pixels with {}",
        replaced,
        color.to_rgba_string()
    );
    replaced
}
