//! In-memory fitting room / shopping cart.
//!
//! Items live for the lifetime of the process only.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product the user saved to the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedClothes {
    pub id: Uuid,
    pub brand: Option<String>,
    pub gender: Option<String>,
    pub img_link: Option<String>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub sizes: Option<String>,
    pub product_type: Option<String>,
    pub shop_item_link: Option<String>,
}

impl From<Product> for SavedClothes {
    fn from(p: Product) -> Self {
        Self {
            id: Uuid::new_v4(),
            brand: p.brand,
            gender: p.gender,
            img_link: p.img_link,
            name: p.name,
            price: p.price,
            sizes: p.sizes,
            product_type: p.product_type,
            shop_item_link: p.shop_item_link,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub item_count: usize,
    pub total_price: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<SavedClothes>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a product; the same product may be saved more than once
    pub fn add(&mut self, product: Product) -> Uuid {
        let item = SavedClothes::from(product);
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn items(&self) -> &[SavedClothes] {
        &self.items
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of prices; items without a price count as 0
    pub fn total_price(&self) -> i64 {
        self.items.iter().map(|item| item.price.unwrap_or(0)).sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            total_price: self.total_price(),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
