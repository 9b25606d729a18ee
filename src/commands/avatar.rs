use crate::avatar::{
    self, sample_center_color_from_file, AvatarBuilder, AvatarStore, BuiltAvatar, FacePlacement,
};
use crate::commands::config::current_config;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tauri::command;

// Last preview built, kept until the user saves it or builds another
lazy_static::lazy_static! {
    static ref PENDING_AVATAR: Arc<RwLock<Option<RgbaImage>>> = Arc::new(RwLock::new(None));
}

/// Avatar image handed to the front-end
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarPreview {
    /// PNG, base64 encoded
    pub png_base64: String,
    pub width: u32,
    pub height: u32,
    /// `rgba(r,g,b,a)` or an error label when no face was found
    pub color: String,
    pub face: Option<FacePlacement>,
}

fn to_preview(image: &RgbaImage, color: String, face: Option<FacePlacement>) -> Result<AvatarPreview, String> {
    let png = avatar::encode_png(image).map_err(|e| e.to_string())?;
    Ok(AvatarPreview {
        png_base64: STANDARD.encode(png),
        width: image.width(),
        height: image.height(),
        color,
        face,
    })
}

/// Build the personalised avatar from the stored face and keep it pending
#[command]
pub async fn build_avatar_preview() -> Result<AvatarPreview, String> {
    let config = current_config()?;
    let builder = AvatarBuilder::from_config(&config.avatar, config.face_path());

    let built = tokio::task::spawn_blocking(move || builder.build())
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| {
            log::error!("Failed to build avatar: {}", e);
            e.to_string()
        })?;

    let preview = to_preview(&built.image, built.color_label(), built.face)?;
    stage_pending(built)?;
    Ok(preview)
}

// Only a personalised build can be saved; a fallback clears any older preview
fn stage_pending(built: BuiltAvatar) -> Result<(), String> {
    let mut pending = PENDING_AVATAR.write().map_err(|e| e.to_string())?;
    *pending = if built.is_personalised() {
        Some(built.image)
    } else {
        log::warn!("No personalised avatar built, nothing to save");
        None
    };
    Ok(())
}

fn take_pending() -> Result<RgbaImage, String> {
    let pending = PENDING_AVATAR.read().map_err(|e| e.to_string())?;
    pending.clone().ok_or_else(|| "No avatar to save".to_string())
}

/// Persist the pending avatar and record it as the latest one
#[command]
pub async fn save_avatar() -> Result<String, String> {
    let image = take_pending()?;

    let config = current_config()?;
    let store = AvatarStore::from_config(&config.storage);
    let path = tokio::task::spawn_blocking(move || store.save(&image))
        .await
        .map_err(|e| format!("Task join error: {}", e))?
        .map_err(|e| {
            log::error!("Error saving avatar: {}", e);
            format!("Error saving avatar: {}", e)
        })?;

    Ok(path.to_string_lossy().into_owned())
}

/// Latest saved avatar, or the default template when none is available
#[command]
pub async fn load_latest_avatar() -> Result<AvatarPreview, String> {
    let config = current_config()?;
    let store = AvatarStore::from_config(&config.storage);
    let template_path = config.avatar.template_path.clone();

    let image = tokio::task::spawn_blocking(move || {
        let fallback = || {
            avatar::load_template(template_path.as_deref().map(std::path::Path::new))
                .unwrap_or_else(|e| {
                    log::error!("Failed to load avatar template: {}", e);
                    RgbaImage::new(1, 1)
                })
        };
        store.load_latest_or(fallback)
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?;

    to_preview(&image, String::new(), None)
}

/// Color at the center of the stored face image
#[command]
pub async fn get_dominant_color() -> Result<String, String> {
    let config = current_config()?;
    let face_path = config.face_path();

    let color = tokio::task::spawn_blocking(move || sample_center_color_from_file(&face_path))
        .await
        .map_err(|e| format!("Task join error: {}", e))?;

    match color {
        Ok(c) => Ok(c.to_rgba_string()),
        Err(e) => {
            log::warn!("Error analyzing image: {}", e);
            Ok("Error: Image not found".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_is_base64_png() {
        let img = RgbaImage::new(4, 2);
        let preview = to_preview(&img, "rgba(1,2,3,4)".to_string(), None).unwrap();
        let bytes = STANDARD.decode(preview.png_base64).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        assert_eq!((preview.width, preview.height), (4, 2));
    }

    #[test]
    fn test_fallback_build_cannot_replace_latest_avatar() {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path().join("Avatars"), dir.path().join("prefs.toml"));

        let personalised = BuiltAvatar {
            image: RgbaImage::from_pixel(4, 4, image::Rgba([200, 150, 120, 255])),
            color: Some(crate::types::Rgba8::new(200, 150, 120, 255)),
            recolored_pixels: 16,
            face: None,
        };
        assert!(personalised.is_personalised());
        stage_pending(personalised).unwrap();
        let saved = store.save(&take_pending().unwrap()).unwrap();

        // No face file: the builder falls back to the plain template
        let fallback = AvatarBuilder::new(dir.path().join("user-face.png")).build().unwrap();
        assert!(!fallback.is_personalised());
        stage_pending(fallback).unwrap();

        assert!(take_pending().is_err());
        assert_eq!(store.latest_path(), Some(saved));
    }
}
