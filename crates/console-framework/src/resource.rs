//! # AdminResource Trait
//!
//! The `AdminResource` trait is the contract every console resource (roles,
//! users, AI models, ...) implements so one generic [`ListController`](crate::ListController)
//! can list and mutate it.
//!
//! Associated types keep payloads apart: a `Role` controller only accepts a
//! `RoleCreate` body, and the compiler rejects a `UserCreate` sent its way.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// A collection exposed by the admin API.
pub trait AdminResource: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    /// The identifier used in member paths (`/roles/{id}`).
    type Id: Display + Debug + Clone + Send + Sync;

    /// Body of a create request.
    type Create: Serialize + Debug + Send + Sync;

    /// Body of an update request.
    type Update: Serialize + Debug + Send + Sync;

    /// Collection path relative to the API base, e.g. `/roles`.
    const COLLECTION: &'static str;

    /// Path of a single member of the collection.
    fn member_path(id: &Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }

    /// Short type name for log fields.
    fn kind() -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
    }
}

/// Payload type for resources that cannot be created or updated.
///
/// Being uninhabited, no value of it can ever be passed to `create`/`update`.
#[derive(Debug, Clone, Copy, Serialize)]
pub enum ReadOnly {}
