use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Role assigned to every account at registration.
pub const DEFAULT_ROLE: &str = "USER";

/// An account as stored in the `users` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// bcrypt hash of the user's password. Never serialized.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// A user about to be inserted. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}

impl NewUser {
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        Self {
            name,
            email,
            password_hash,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}
