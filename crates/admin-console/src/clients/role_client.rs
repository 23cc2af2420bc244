//! # Role Client
//!
//! Provides a high-level API for the `/roles` collection.
use crate::clients::require;
use crate::error::ConsoleError;
use crate::model::{Role, RoleCreate, RoleUpdate};
use async_trait::async_trait;
use console_framework::{
    AdminResource, ApiError, ApiRequest, ApiTransport, ConsoleClient, ListController,
    MutationReceipt, QueryParams,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the role collection.
pub struct RoleClient {
    inner: ListController<Role>,
}

impl RoleClient {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        Self {
            inner: ListController::new(transport, params),
        }
    }
}

#[async_trait]
impl ConsoleClient<Role> for RoleClient {
    type Error = ConsoleError;

    fn controller(&self) -> &ListController<Role> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ConsoleError::Api(e)
    }
}

impl RoleClient {
    /// Roles from the last successful read.
    pub fn roles(&self) -> Vec<Role> {
        self.inner.items()
    }

    #[instrument(skip(self))]
    pub async fn create_role(&self, params: RoleCreate) -> Result<MutationReceipt, ConsoleError> {
        require(&params.name, "Role name")?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_role(
        &self,
        id: u64,
        update: RoleUpdate,
    ) -> Result<MutationReceipt, ConsoleError> {
        if let Some(name) = &update.name {
            require(name, "Role name")?;
        }
        debug!("Sending request");
        self.inner.update(&id, update).await.map_err(Self::map_error)
    }

    /// Replaces the permission set of a role.
    #[instrument(skip(self))]
    pub async fn assign_permissions(
        &self,
        id: u64,
        permission_ids: &[u64],
    ) -> Result<MutationReceipt, ConsoleError> {
        debug!(count = permission_ids.len(), "Assigning permissions to role {}", id);
        let request = ApiRequest::put(format!("{}/permissions", Role::member_path(&id)))
            .with_json(&json!({ "permission_ids": permission_ids }))?;
        self.inner.perform(request).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_framework::mock::MockTransport;
    use console_framework::MutationKind;

    fn client() -> (Arc<MockTransport>, RoleClient) {
        let mock = Arc::new(MockTransport::new());
        (mock.clone(), RoleClient::new(mock, QueryParams::default()))
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected_locally() {
        let (mock, roles) = client();

        let err = roles
            .create_role(RoleCreate {
                name: "  ".into(),
                ..RoleCreate::default()
            })
            .await
            .unwrap_err();

        assert_eq!(err, ConsoleError::Validation("Role name is required".into()));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_assign_permissions_puts_ids_and_reloads() {
        let (mock, roles) = client();
        mock.expect_put("/roles/3/permissions")
            .return_json(json!({ "success": true, "message": "Permissions updated" }));
        mock.expect_get("/roles").return_json(json!([
            { "id": 3, "name": "editor", "permissions": [{ "id": 9, "name": "posts.edit" }] }
        ]));

        let receipt = roles.assign_permissions(3, &[9]).await.unwrap();

        assert_eq!(receipt.message.as_deref(), Some("Permissions updated"));
        assert_eq!(mock.requests()[0].body, Some(json!({ "permission_ids": [9] })));
        assert!(roles.roles()[0].has_permission("posts.edit"));
        assert!(roles
            .controller()
            .mutation_state(MutationKind::Action)
            .data()
            .is_some());
        mock.verify();
    }
}
