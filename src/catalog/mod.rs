//! Product catalog and user records stored in a Firebase Realtime Database.
//!
//! Talks to the database through its REST API: every node is reachable as
//! `<database>/<path>.json` and equality queries use `orderBy` / `equalTo`.

pub mod product;
pub mod user;

pub use product::{Product, ProductFilter, ProductRepository};
pub use user::{CustomClaims, ProviderInfo, User, UserService};

use crate::config::CatalogConfig;
use crate::errors::AvatarError;
use serde_json::Value;
use std::time::Duration;

/// Thin REST client shared by the product and user services
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl DatabaseClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, AvatarError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.database_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// REST URL of the node made of `segments` (empty segments are skipped)
    pub fn node_url(&self, segments: &[&str]) -> String {
        let path: Vec<&str> = segments
            .iter()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty())
            .collect();
        format!("{}/{}.json", self.base_url, path.join("/"))
    }

    fn with_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => request.query(&[("auth", token.as_str())]),
            None => request,
        }
    }

    pub async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Value, AvatarError> {
        let request = self.with_auth(self.client.get(url)).query(query);
        let response = request.send().await?;
        Self::read_json(response).await
    }

    pub async fn put(&self, url: &str, body: &Value) -> Result<Value, AvatarError> {
        let response = self.with_auth(self.client.put(url)).json(body).send().await?;
        Self::read_json(response).await
    }

    pub async fn patch(&self, url: &str, body: &Value) -> Result<Value, AvatarError> {
        let response = self.with_auth(self.client.patch(url)).json(body).send().await?;
        Self::read_json(response).await
    }

    pub async fn post(&self, url: &str, body: &Value) -> Result<Value, AvatarError> {
        let response = self.with_auth(self.client.post(url)).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, AvatarError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AvatarError::CatalogError(format!(
                "Database returned {}: {}",
                status, body
            )));
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Quote a value the way the REST query parameters expect (`"Nike"`)
pub(crate) fn query_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// Children of a snapshot as `(key, value)` pairs.
///
/// Nodes with integer keys come back as JSON arrays, possibly with `null`
/// holes; those are skipped.
pub fn snapshot_children(snapshot: Value) -> Vec<(String, Value)> {
    match snapshot {
        Value::Object(map) => map.into_iter().collect(),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, v)| !v.is_null())
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        _ => Vec::new(),
    }
}

/// Deserialize every child that fits `T`; others are skipped
pub fn decode_children<T: serde::de::DeserializeOwned>(snapshot: Value) -> Vec<T> {
    snapshot_children(snapshot)
        .into_iter()
        .filter_map(|(key, value)| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::debug!("Skipping child {}: {}", key, e);
                None
            }
        })
        .collect()
}
