use super::{decode_children, query_string, snapshot_children, DatabaseClient};
use crate::config::CatalogConfig;
use crate::errors::AvatarError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sign-in provider entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderInfo {
    pub provider_id: String,
    pub email: String,
    pub display_name: String,
    pub password: String,
}

/// Body measurements and avatar details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomClaims {
    pub username: String,
    pub gender: String,
    pub height: i32,
    pub shoulder: i32,
    pub chest: i32,
    pub waist: i32,
    pub hip: i32,
    pub back: i32,
    pub hiphigh: i32,
    pub armlength: i32,
    pub leglength: i32,
    pub armthickness: i32,
    pub legthickness: i32,
    pub avatarname: String,
    #[serde(rename = "imgLink")]
    pub img_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub local_id: String,
    pub email: String,
    pub display_name: String,
    pub phone_number: String,
    pub provider_user_info: Vec<ProviderInfo>,
    pub custom_claims: CustomClaims,
}

/// User records under the `users` node
#[derive(Debug, Clone)]
pub struct UserService {
    db: DatabaseClient,
    users_path: String,
}

impl UserService {
    pub fn new(config: &CatalogConfig) -> Result<Self, AvatarError> {
        Ok(Self::with_client(DatabaseClient::new(config)?, &config.users_path))
    }

    pub fn with_client(db: DatabaseClient, users_path: &str) -> Self {
        Self {
            db,
            users_path: users_path.to_string(),
        }
    }

    async fn query_by(&self, field: &str, value: &str) -> Result<Value, AvatarError> {
        let query = [
            ("orderBy", query_string(field)),
            ("equalTo", query_string(value)),
        ];
        self.db.get(&self.db.node_url(&[&self.users_path]), &query).await
    }

    /// First user with this display name
    pub async fn get_user_by_display_name(&self, display_name: &str) -> Result<Option<User>, AvatarError> {
        let snapshot = self.query_by("displayName", display_name).await?;
        Ok(decode_children::<User>(snapshot).into_iter().next())
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, AvatarError> {
        let snapshot = self.db.get(&self.db.node_url(&[&self.users_path]), &[]).await?;
        Ok(decode_children(snapshot))
    }

    /// Database key of the first child whose `localId` matches
    async fn find_user_key(&self, local_id: &str) -> Result<Option<String>, AvatarError> {
        let snapshot = self.query_by("localId", local_id).await?;
        Ok(snapshot_children(snapshot).into_iter().next().map(|(key, _)| key))
    }

    /// Push a new user and return its generated key
    pub async fn create_user(&self, user: &User) -> Result<String, AvatarError> {
        let body = serde_json::to_value(user)
            .map_err(|e| AvatarError::CatalogError(format!("Failed to encode user: {}", e)))?;
        let response = self.db.post(&self.db.node_url(&[&self.users_path]), &body).await?;

        response
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AvatarError::CatalogError("Push response carried no key".to_string()))
    }

    /// Merge `updates` into the user. `Ok(false)` when no user matches.
    pub async fn update_user(&self, local_id: &str, updates: Map<String, Value>) -> Result<bool, AvatarError> {
        let Some(key) = self.find_user_key(local_id).await? else {
            log::warn!("No user with localId {}", local_id);
            return Ok(false);
        };

        let url = self.db.node_url(&[&self.users_path, &key]);
        self.db.patch(&url, &Value::Object(updates)).await?;
        Ok(true)
    }

    /// Replace the user's measurements. `Ok(false)` when no user matches.
    pub async fn update_custom_claims(&self, local_id: &str, claims: &CustomClaims) -> Result<bool, AvatarError> {
        let Some(key) = self.find_user_key(local_id).await? else {
            log::warn!("No user with localId {}", local_id);
            return Ok(false);
        };

        let body = serde_json::to_value(claims)
            .map_err(|e| AvatarError::CatalogError(format!("Failed to encode claims: {}", e)))?;
        let url = self.db.node_url(&[&self.users_path, &key, "customClaims"]);
        self.db.put(&url, &body).await?;
        Ok(true)
    }
}
