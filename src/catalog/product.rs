use super::{decode_children, query_string, DatabaseClient};
use crate::config::CatalogConfig;
use crate::errors::AvatarError;
use serde::{Deserialize, Serialize};

/// Product record as stored in the database
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub brand: Option<String>,
    pub gender: Option<String>,
    #[serde(rename = "imgLink")]
    pub img_link: Option<String>,
    pub name: Option<String>,
    pub price: Option<i64>,
    pub sizes: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    #[serde(rename = "shopItemlink")]
    pub shop_item_link: Option<String>,
}

/// Optional equality filters plus a price ceiling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub brand: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub gender: Option<String>,
    pub max_price: Option<i64>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        fn eq(want: &Option<String>, have: &Option<String>) -> bool {
            want.is_none() || want == have
        }

        eq(&self.brand, &product.brand)
            && eq(&self.product_type, &product.product_type)
            && eq(&self.gender, &product.gender)
            && match self.max_price {
                None => true,
                Some(max) => product.price.is_some_and(|p| p <= max),
            }
    }

    /// Server-side query for the most selective filter present
    fn server_query(&self) -> Vec<(&'static str, String)> {
        if let Some(brand) = &self.brand {
            vec![("orderBy", query_string("brand")), ("equalTo", query_string(brand))]
        } else if let Some(t) = &self.product_type {
            vec![("orderBy", query_string("type")), ("equalTo", query_string(t))]
        } else if let Some(gender) = &self.gender {
            vec![("orderBy", query_string("gender")), ("equalTo", query_string(gender))]
        } else if let Some(max) = self.max_price {
            vec![("orderBy", query_string("price")), ("endAt", max.to_string())]
        } else {
            Vec::new()
        }
    }
}

/// Read-only access to the product catalog
#[derive(Debug, Clone)]
pub struct ProductRepository {
    db: DatabaseClient,
    products_path: String,
}

impl ProductRepository {
    pub fn new(config: &CatalogConfig) -> Result<Self, AvatarError> {
        Ok(Self::with_client(DatabaseClient::new(config)?, &config.products_path))
    }

    pub fn with_client(db: DatabaseClient, products_path: &str) -> Self {
        Self {
            db,
            products_path: products_path.to_string(),
        }
    }

    pub async fn get_all_products(&self) -> Result<Vec<Product>, AvatarError> {
        let snapshot = self.db.get(&self.db.node_url(&[&self.products_path]), &[]).await?;
        let products: Vec<Product> = decode_children(snapshot);
        log::debug!("Fetched {} products", products.len());
        Ok(products)
    }

    pub async fn get_product_by_id(&self, product_id: &str) -> Result<Option<Product>, AvatarError> {
        let url = self.db.node_url(&[&self.products_path, product_id]);
        let snapshot = self.db.get(&url, &[]).await?;
        if snapshot.is_null() {
            return Ok(None);
        }
        serde_json::from_value(snapshot)
            .map(Some)
            .map_err(|e| AvatarError::CatalogError(format!("Malformed product {}: {}", product_id, e)))
    }

    pub async fn get_products_by_brand(&self, brand: &str) -> Result<Vec<Product>, AvatarError> {
        self.get_filtered_products(&ProductFilter {
            brand: Some(brand.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Query by the most selective filter, then apply all filters locally
    pub async fn get_filtered_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, AvatarError> {
        let url = self.db.node_url(&[&self.products_path]);
        let snapshot = self.db.get(&url, &filter.server_query()).await?;
        let products: Vec<Product> = decode_children::<Product>(snapshot)
            .into_iter()
            .filter(|p| filter.matches(p))
            .collect();

        log::debug!("Filter {:?} matched {} products", filter, products.len());
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_product_field_names() {
        let product: Product = serde_json::from_value(json!({
            "brand": "Uniqlo",
            "imgLink": "https://img/1.png",
            "price": 199,
            "type": "tops",
            "shopItemlink": "https://shop/1"
        }))
        .unwrap();
        assert_eq!(product.product_type.as_deref(), Some("tops"));
        assert_eq!(product.shop_item_link.as_deref(), Some("https://shop/1"));
        assert_eq!(product.gender, None);
    }

    #[test]
    fn test_filter_requires_price_for_ceiling() {
        let filter = ProductFilter {
            max_price: Some(100),
            ..Default::default()
        };
        assert!(!filter.matches(&Product::default()));
        assert!(filter.matches(&Product {
            price: Some(100),
            ..Default::default()
        }));
    }

    #[test]
    fn test_server_query_prefers_brand() {
        let filter = ProductFilter {
            brand: Some("Zara".to_string()),
            gender: Some("women".to_string()),
            ..Default::default()
        };
        let q = filter.server_query();
        assert_eq!(q[0], ("orderBy", "\"brand\"".to_string()));
        assert_eq!(q[1], ("equalTo", "\"Zara\"".to_string()));
    }

    #[test]
    fn test_server_query_price_uses_end_at() {
        let filter = ProductFilter {
            max_price: Some(50),
            ..Default::default()
        };
        assert_eq!(filter.server_query()[1], ("endAt", "50".to_string()));
        assert!(ProductFilter::default().server_query().is_empty());
    }
}
