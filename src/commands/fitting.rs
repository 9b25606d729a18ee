use crate::avatar::{self, AvatarStore};
use crate::commands::config::current_config;
use crate::fitting::{fetch_garment_image, garment_offset, render_fitting_preview, GarmentLayer, GarmentPlacement};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tauri::command;

/// Garment picked in the fitting room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarmentSelection {
    pub garment_type: String,
    pub img_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FittingPreview {
    pub png_base64: String,
    pub placements: Vec<GarmentPlacement>,
}

/// Vertical offset the preview applies to a garment type
#[command]
pub async fn get_garment_offset(garment_type: String) -> Result<i32, String> {
    Ok(garment_offset(&garment_type))
}

/// Overlay the selected garments on the latest avatar
#[command]
pub async fn render_fitting(garments: Vec<GarmentSelection>) -> Result<FittingPreview, String> {
    let config = current_config()?;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.catalog.timeout_secs))
        .build()
        .map_err(|e| e.to_string())?;

    let mut layers = Vec::with_capacity(garments.len());
    for garment in garments {
        match fetch_garment_image(&client, &garment.img_link).await {
            Ok(image) => layers.push(GarmentLayer {
                garment_type: garment.garment_type,
                image,
            }),
            Err(e) => log::warn!("Skipping garment {}: {}", garment.img_link, e),
        }
    }

    let store = AvatarStore::from_config(&config.storage);
    let template_path = config.avatar.template_path.clone();
    let display_size = config.fitting.display_size;

    let (canvas, placements) = tokio::task::spawn_blocking(move || {
        let base = match avatar::load_template(template_path.as_deref().map(std::path::Path::new)) {
            Ok(template) => store.load_latest_or(|| template),
            Err(e) => return Err(e),
        };
        render_fitting_preview(&base, &layers, display_size)
    })
    .await
    .map_err(|e| format!("Task join error: {}", e))?
    .map_err(|e| {
        log::error!("Failed to render fitting preview: {}", e);
        e.to_string()
    })?;

    let png = avatar::encode_png(&canvas).map_err(|e| e.to_string())?;
    Ok(FittingPreview {
        png_base64: STANDARD.encode(png),
        placements,
    })
}
