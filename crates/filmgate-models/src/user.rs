//! User audit profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An append-only audit record of a user who has contacted the bot.
///
/// Not consulted for authorization decisions; those are always re-derived
/// live from the membership directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Platform user id.
    pub id: i64,

    /// Username, if the user has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// First name as reported by the platform.
    pub first_name: String,

    /// Last name, if reported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,

    /// When the user first contacted the bot.
    pub joined_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a profile for a first contact.
    pub fn new(
        id: i64,
        username: Option<String>,
        first_name: impl Into<String>,
        last_name: Option<String>,
    ) -> Self {
        Self {
            id,
            username,
            first_name: first_name.into(),
            last_name,
            joined_at: Utc::now(),
        }
    }

    /// Refreshes the name fields from a later contact, keeping `joined_at`.
    pub fn refresh(&mut self, other: &UserProfile) {
        self.username = other.username.clone();
        self.first_name = other.first_name.clone();
        self.last_name = other.last_name.clone();
    }

    /// Best available display name.
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}
