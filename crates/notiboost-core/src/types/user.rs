use super::Properties;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// User identifier
    pub user_id: String,

    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Arbitrary user attributes
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub properties: Properties,
}

impl User {
    /// Create a user with only an identifier
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            name: None,
            email: None,
            phone: None,
            properties: Properties::new(),
        }
    }

    /// Set the display name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the email address
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the phone number
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Add a property
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// Partial user record for `PUT /api/v1/users/{id}`.
///
/// Unset fields are left out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    /// Updated display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Updated email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Updated phone number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Updated attributes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl UserUpdate {
    /// Create an empty update
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the display name
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the email address
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Update the phone number
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set a property
    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties
            .get_or_insert_with(Properties::new)
            .insert(key.into(), value.into());
        self
    }
}

/// Mobile push platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushPlatform {
    /// Firebase Cloud Messaging on Android
    Android,
    /// Apple Push Notification service
    Ios,
}

impl std::fmt::Display for PushPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Android => write!(f, "android"),
            Self::Ios => write!(f, "ios"),
        }
    }
}

/// Per-user delivery channel identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelData {
    /// Email address for the email channel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Phone number for SMS
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Device push token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_token: Option<String>,

    /// Platform the push token belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_platform: Option<PushPlatform>,

    /// Zalo account identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zalo_user_id: Option<String>,
}

impl ChannelData {
    /// Create empty channel data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the email address
    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the phone number
    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Set the push token and its platform
    #[must_use]
    pub fn push(mut self, token: impl Into<String>, platform: PushPlatform) -> Self {
        self.push_token = Some(token.into());
        self.push_platform = Some(platform);
        self
    }

    /// Set the Zalo account identifier
    #[must_use]
    pub fn zalo_user_id(mut self, id: impl Into<String>) -> Self {
        self.zalo_user_id = Some(id.into());
        self
    }
}

/// On/off switch for a channel or category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSetting {
    /// Whether notifications are allowed
    pub enabled: bool,
}

/// Per-user notification preferences.
///
/// Channel and category names are not checked client-side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    /// Settings keyed by channel name (e.g., "email", "sms")
    #[serde(default)]
    pub channels: HashMap<String, PreferenceSetting>,

    /// Settings keyed by category name (e.g., "marketing")
    #[serde(default)]
    pub categories: HashMap<String, PreferenceSetting>,
}

impl UserPreferences {
    /// Create empty preferences
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable a channel
    #[must_use]
    pub fn channel(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.channels
            .insert(name.into(), PreferenceSetting { enabled });
        self
    }

    /// Enable or disable a category
    #[must_use]
    pub fn category(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.categories
            .insert(name.into(), PreferenceSetting { enabled });
        self
    }
}
