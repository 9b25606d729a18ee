use crate::cart::{Cart, CartSummary, SavedClothes};
use crate::catalog::Product;
use std::sync::{Arc, RwLock};
use tauri::command;
use uuid::Uuid;

lazy_static::lazy_static! {
    static ref GLOBAL_CART: Arc<RwLock<Cart>> = Arc::new(RwLock::new(Cart::new()));
}

#[command]
pub async fn add_to_cart(product: Product) -> Result<Uuid, String> {
    let mut cart = GLOBAL_CART.write().map_err(|e| e.to_string())?;
    let id = cart.add(product);
    log::debug!("Added {} to cart ({} items)", id, cart.item_count());
    Ok(id)
}

#[command]
pub async fn get_cart_items() -> Result<Vec<SavedClothes>, String> {
    let cart = GLOBAL_CART.read().map_err(|e| e.to_string())?;
    Ok(cart.items().to_vec())
}

#[command]
pub async fn remove_from_cart(id: Uuid) -> Result<bool, String> {
    let mut cart = GLOBAL_CART.write().map_err(|e| e.to_string())?;
    Ok(cart.remove(id))
}

#[command]
pub async fn get_cart_summary() -> Result<CartSummary, String> {
    let cart = GLOBAL_CART.read().map_err(|e| e.to_string())?;
    Ok(cart.summary())
}

#[command]
pub async fn clear_cart() -> Result<(), String> {
    let mut cart = GLOBAL_CART.write().map_err(|e| e.to_string())?;
    cart.clear();
    Ok(())
}
