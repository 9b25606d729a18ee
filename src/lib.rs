//! AvatarFit: try-on avatar pipeline for Tauri shopping apps
//!
//! This crate turns a selfie into a personalised avatar and previews garments on it.
//!
//! # Features
//! - Face capture gated on detected faces, center crop and orientation fix
//! - Background removal through a remote HTTP service
//! - Skin tone sampling and template recolouring
//! - Face compositing onto the avatar
//! - Garment overlay preview keyed by garment type
//! - Product catalog, user records and an in-memory cart
//!
//! # Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! avatarfit = "0.3"
//! tauri = { version = "2.0", features = ["protocol-asset"] }
//! ```
//!
//! Then in your Tauri app:
//! ```rust,ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(avatarfit::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
pub mod avatar;
pub mod background;
pub mod camera;
pub mod capture;
pub mod cart;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod errors;
pub mod fitting;
pub mod types;

// Synthetic images for offline testing
pub mod testing;

// Re-exports for convenience
pub use avatar::{AvatarBuilder, AvatarStore, BuiltAvatar, DominantColor};
pub use background::{BackgroundRemover, FaceStore};
pub use camera::{FaceCamera, FrameSource};
pub use capture::{capture_face_photo, FaceGate};
pub use cart::{Cart, SavedClothes};
pub use catalog::{Product, ProductFilter, ProductRepository, User, UserService};
pub use config::AvatarFitConfig;
pub use errors::AvatarError;
pub use fitting::{garment_offset, render_fitting_preview, GarmentLayer};
pub use types::{CameraDeviceInfo, CapturedPhoto, FaceBox, Rgba8};

use tauri::{
    plugin::{Builder, TauriPlugin},
    Runtime,
};

/// Initialize the AvatarFit plugin with all commands
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("avatarfit")
        .invoke_handler(tauri::generate_handler![
            // Capture commands
            commands::capture::get_available_cameras,
            commands::capture::evaluate_faces,
            commands::capture::capture_face,
            commands::capture::release_camera,
            // Background removal commands
            commands::background::remove_photo_background,
            commands::background::capture_and_process_face,
            commands::background::has_user_face,
            // Avatar commands
            commands::avatar::build_avatar_preview,
            commands::avatar::save_avatar,
            commands::avatar::load_latest_avatar,
            commands::avatar::get_dominant_color,
            // Fitting room commands
            commands::fitting::get_garment_offset,
            commands::fitting::render_fitting,
            // Catalog commands
            commands::catalog::get_all_products,
            commands::catalog::get_product_by_id,
            commands::catalog::get_products_by_brand,
            commands::catalog::get_filtered_products,
            commands::catalog::get_user_by_display_name,
            commands::catalog::get_all_users,
            commands::catalog::create_user,
            commands::catalog::update_user,
            commands::catalog::update_custom_claims,
            // Cart commands
            commands::cart::add_to_cart,
            commands::cart::get_cart_items,
            commands::cart::remove_from_cart,
            commands::cart::get_cart_summary,
            commands::cart::clear_cart,
            // Configuration commands
            commands::config::get_config,
            commands::config::update_config,
            commands::config::reset_config,
            commands::config::update_background_config,
        ])
        .build()
}

/// Initialize logging for the avatar pipeline
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "avatarfit=info");
    }
    let _ = env_logger::try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get crate information
pub fn get_info() -> CrateInfo {
    CrateInfo {
        name: NAME.to_string(),
        version: VERSION.to_string(),
        description: DESCRIPTION.to_string(),
    }
}

/// Crate information structure
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CrateInfo {
    pub name: String,
    pub version: String,
    pub description: String,
}
