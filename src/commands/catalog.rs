use crate::catalog::{CustomClaims, Product, ProductFilter, ProductRepository, User, UserService};
use crate::commands::config::current_config;
use serde_json::{Map, Value};
use tauri::command;

fn products() -> Result<ProductRepository, String> {
    let config = current_config()?;
    ProductRepository::new(&config.catalog).map_err(|e| e.to_string())
}

fn users() -> Result<UserService, String> {
    let config = current_config()?;
    UserService::new(&config.catalog).map_err(|e| e.to_string())
}

fn log_err(context: &str) -> impl Fn(crate::errors::AvatarError) -> String + '_ {
    move |e| {
        log::error!("{}: {}", context, e);
        format!("{}: {}", context, e)
    }
}

#[command]
pub async fn get_all_products() -> Result<Vec<Product>, String> {
    products()?
        .get_all_products()
        .await
        .map_err(log_err("Failed to load products"))
}

#[command]
pub async fn get_product_by_id(product_id: String) -> Result<Option<Product>, String> {
    products()?
        .get_product_by_id(&product_id)
        .await
        .map_err(log_err("Failed to load product"))
}

#[command]
pub async fn get_products_by_brand(brand: String) -> Result<Vec<Product>, String> {
    products()?
        .get_products_by_brand(&brand)
        .await
        .map_err(log_err("Failed to load products"))
}

#[command]
pub async fn get_filtered_products(filter: ProductFilter) -> Result<Vec<Product>, String> {
    products()?
        .get_filtered_products(&filter)
        .await
        .map_err(log_err("Failed to filter products"))
}

#[command]
pub async fn get_user_by_display_name(display_name: String) -> Result<Option<User>, String> {
    users()?
        .get_user_by_display_name(&display_name)
        .await
        .map_err(log_err("Failed to load user"))
}

#[command]
pub async fn get_all_users() -> Result<Vec<User>, String> {
    users()?
        .get_all_users()
        .await
        .map_err(log_err("Failed to load users"))
}

#[command]
pub async fn create_user(user: User) -> Result<String, String> {
    users()?
        .create_user(&user)
        .await
        .map_err(log_err("Failed to create user"))
}

#[command]
pub async fn update_user(local_id: String, updates: Map<String, Value>) -> Result<bool, String> {
    users()?
        .update_user(&local_id, updates)
        .await
        .map_err(log_err("Failed to update user"))
}

#[command]
pub async fn update_custom_claims(local_id: String, claims: CustomClaims) -> Result<bool, String> {
    users()?
        .update_custom_claims(&local_id, &claims)
        .await
        .map_err(log_err("Failed to update measurements"))
}
