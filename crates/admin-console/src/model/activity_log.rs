use console_framework::{AdminResource, ReadOnly};
use serde::{Deserialize, Serialize};

/// One audited action performed in the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: u64,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub action: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl AdminResource for ActivityLog {
    type Id = u64;
    type Create = ReadOnly;
    type Update = ReadOnly;
    const COLLECTION: &'static str = "/activity-logs";
}
