//! User API endpoints.
//!
//! Responses are returned as the server sent them, including fields this
//! crate has no type for.

use crate::{NotiboostClient, RequestOptions};
use notiboost_core::{ChannelData, Result, User, UserPreferences, UserUpdate};
use serde_json::Value;

/// User API endpoints
pub struct UsersApi<'a> {
    client: &'a NotiboostClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a NotiboostClient) -> Self {
        Self { client }
    }

    /// Create a user
    pub async fn create(&self, user: &User) -> Result<Value> {
        self.create_with_options(user, &RequestOptions::default())
            .await
    }

    /// Create a user with extra request options (e.g., an idempotency key)
    pub async fn create_with_options(
        &self,
        user: &User,
        options: &RequestOptions,
    ) -> Result<Value> {
        self.client
            .post("/api/v1/users", user, Some(options))
            .await
    }

    /// Get a user by identifier
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let user = client.users().get("u_123").await?;
    /// println!("email: {}", user["email"]);
    /// ```
    pub async fn get(&self, user_id: &str) -> Result<Value> {
        self.client.get(&format!("/api/v1/users/{user_id}")).await
    }

    /// Update some fields of a user
    pub async fn update(&self, user_id: &str, update: &UserUpdate) -> Result<Value> {
        self.update_with_options(user_id, update, &RequestOptions::default())
            .await
    }

    /// Update some fields of a user with extra request options
    pub async fn update_with_options(
        &self,
        user_id: &str,
        update: &UserUpdate,
        options: &RequestOptions,
    ) -> Result<Value> {
        self.client
            .put(&format!("/api/v1/users/{user_id}"), update, Some(options))
            .await
    }

    /// Delete a user
    pub async fn delete(&self, user_id: &str) -> Result<Value> {
        self.client
            .delete(&format!("/api/v1/users/{user_id}"))
            .await
    }

    /// Replace the user's delivery channel identifiers
    pub async fn set_channel_data(&self, user_id: &str, data: &ChannelData) -> Result<Value> {
        self.client
            .put(&format!("/api/v1/users/{user_id}/channel_data"), data, None)
            .await
    }

    /// Replace the user's notification preferences
    pub async fn set_preferences(
        &self,
        user_id: &str,
        preferences: &UserPreferences,
    ) -> Result<Value> {
        self.client
            .put(
                &format!("/api/v1/users/{user_id}/preferences"),
                preferences,
                None,
            )
            .await
    }
}
