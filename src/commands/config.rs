use crate::config::AvatarFitConfig;
use std::sync::{Arc, RwLock};
use tauri::command;

lazy_static::lazy_static! {
    static ref GLOBAL_CONFIG: Arc<RwLock<AvatarFitConfig>> = Arc::new(RwLock::new(AvatarFitConfig::load_or_default()));
}

/// Snapshot of the runtime configuration for other commands
pub(crate) fn current_config() -> Result<AvatarFitConfig, String> {
    let config = GLOBAL_CONFIG.read().map_err(|e| e.to_string())?;
    Ok(config.clone())
}

/// Get the current configuration
#[command]
pub async fn get_config() -> Result<AvatarFitConfig, String> {
    current_config()
}

/// Update configuration
#[command]
pub async fn update_config(new_config: AvatarFitConfig) -> Result<(), String> {
    new_config.validate()?;

    {
        let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
        *config = new_config.clone();
    }

    new_config
        .save_to_file(AvatarFitConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Reset configuration to defaults
#[command]
pub async fn reset_config() -> Result<AvatarFitConfig, String> {
    let default_config = AvatarFitConfig::default();

    {
        let mut config = GLOBAL_CONFIG
            .write()
            .map_err(|e| format!("Failed to write config: {}", e))?;
        *config = default_config.clone();
    }

    default_config
        .save_to_file(AvatarFitConfig::default_path())
        .map_err(|e| e.to_string())?;

    Ok(default_config)
}

/// Point the background removal service at another endpoint or key
#[command]
pub async fn update_background_config(
    background_config: crate::config::BackgroundConfig,
) -> Result<(), String> {
    let mut config = GLOBAL_CONFIG.write().map_err(|e| e.to_string())?;
    let mut updated = config.clone();
    updated.background = background_config;
    updated.validate()?;

    updated
        .save_to_file(AvatarFitConfig::default_path())
        .map_err(|e| e.to_string())?;
    *config = updated;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_config() {
        let config = tokio_test::assert_ok!(get_config().await);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_update_config_rejects_invalid() {
        let mut bad = AvatarFitConfig::default();
        bad.camera.crop_ratio = 0.0;
        tokio_test::assert_err!(update_config(bad).await);
    }
}
