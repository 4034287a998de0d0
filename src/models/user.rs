use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use std::fmt;

use super::UserRole;

/// Account row. `password_hash` is empty for profiles created from the
/// admin panel that nobody has claimed yet.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub protected: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: DateTime<Utc>,
}

/// What the admin users tab shows.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub protected: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UserCreate {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum UserIden {
    Id(Uuid),
    Email(String),
}

impl User {
    pub fn has_password(&self) -> bool {
        self.password_hash
            .as_deref()
            .is_some_and(|h| !h.is_empty())
    }

    /// Name for greetings, falling back to the email's local part.
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email.split('@').next().unwrap_or(&self.email)
    }
}

impl UserProfile {
    pub fn initial(&self) -> char {
        self.full_name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

impl From<User> for UserProfile {
    fn from(
        User {
            id,
            email,
            full_name,
            role,
            protected,
            created_at,
            ..
        }: User,
    ) -> Self {
        UserProfile {
            id,
            email,
            full_name,
            role,
            protected,
            created_at,
        }
    }
}

impl fmt::Display for UserIden {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserIden::Id(id) => write!(f, "ID {}", id),
            UserIden::Email(email) => write!(f, "email '{}'", email),
        }
    }
}

impl From<Uuid> for UserIden {
    fn from(id: Uuid) -> Self {
        UserIden::Id(id)
    }
}

impl From<String> for UserIden {
    fn from(email: String) -> Self {
        UserIden::Email(email)
    }
}

impl From<&str> for UserIden {
    fn from(email: &str) -> Self {
        UserIden::Email(email.to_string())
    }
}
