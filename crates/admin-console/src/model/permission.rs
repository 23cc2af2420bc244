use console_framework::{AdminResource, ReadOnly};
use serde::{Deserialize, Serialize};

/// A single grantable permission such as `billing.refund`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Permissions grouped under a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCategory {
    #[serde(alias = "category")]
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Permission {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl PermissionCategory {
    pub fn new(name: impl Into<String>, permissions: Vec<Permission>) -> Self {
        Self {
            name: name.into(),
            permissions,
        }
    }
}

// Permissions are defined by the server; the console only reads them.
impl AdminResource for Permission {
    type Id = u64;
    type Create = ReadOnly;
    type Update = ReadOnly;
    const COLLECTION: &'static str = "/permissions";
}
