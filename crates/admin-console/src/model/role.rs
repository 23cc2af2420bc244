use crate::model::Permission;
use console_framework::AdminResource;
use serde::{Deserialize, Serialize};

/// A named set of permissions that can be assigned to users.
///
/// # Admin Resource
/// Listed and mutated through `/roles`. See [`RoleCreate`] and [`RoleUpdate`]
/// for the write payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
    #[serde(default)]
    pub users_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The short role reference embedded in users and the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub id: u64,
    pub name: String,
}

/// Payload for creating a new role.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub permission_ids: Vec<u64>,
}

/// Payload for updating an existing role.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AdminResource for Role {
    type Id = u64;
    type Create = RoleCreate;
    type Update = RoleUpdate;
    const COLLECTION: &'static str = "/roles";
}

impl Role {
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name == name)
    }
}
