use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A newly registered user, as appended to the database file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Uniqueness key for registration.
    pub telegram_id: String,
    pub registered_at: String, // ISO-8601 UTC, millisecond precision
}

impl User {
    pub fn new(username: String, telegram_id: String) -> Self {
        Self {
            username,
            telegram_id,
            registered_at: now_timestamp(),
        }
    }
}

impl From<User> for Value {
    fn from(user: User) -> Self {
        serde_json::json!({
            "username": user.username,
            "telegramId": user.telegram_id,
            "registeredAt": user.registered_at,
        })
    }
}

/// The whole database: one JSON document holding every user in registration order.
///
/// Stored records are kept as raw JSON. Files written by older versions may hold numeric
/// or missing ids and extra fields, and those records are listed and rewritten untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub users: Vec<Value>,
}

impl Database {
    /// Strict comparison: a stored numeric id never matches a string id.
    pub fn is_registered(&self, telegram_id: &str) -> bool {
        self.users
            .iter()
            .any(|u| u.get("telegramId").and_then(Value::as_str) == Some(telegram_id))
    }

    pub fn push(&mut self, user: User) {
        self.users.push(user.into());
    }
}

/// Current UTC instant, e.g. "2025-01-02T03:04:05.678Z".
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
