use crate::model::RoleSummary;
use console_framework::AdminResource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a console account.
///
/// # Admin Resource
/// Users live under `/public/users`. Role assignment and status changes go
/// through their own member endpoints rather than [`UserUpdate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<RoleSummary>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub last_login_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
    /// A status this console does not know yet.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Payload for creating a new user.
#[derive(Clone, Default, Serialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<u64>,
}

// Keeps passwords out of request logs.
impl fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCreate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("role_id", &self.role_id)
            .finish()
    }
}

/// Payload for updating an existing user.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AdminResource for User {
    type Id = u64;
    type Create = UserCreate;
    type Update = UserUpdate;
    const COLLECTION: &'static str = "/public/users";
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}
