//! # User Client
//!
//! Provides a high-level API for the `/public/users` collection.
use crate::clients::require;
use crate::error::ConsoleError;
use crate::model::{User, UserCreate, UserStatus, UserUpdate};
use async_trait::async_trait;
use console_framework::{
    AdminResource, ApiError, ApiRequest, ApiTransport, ConsoleClient, ListController,
    MutationReceipt, QueryParams, QueryPatch,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the user collection.
pub struct UserClient {
    inner: ListController<User>,
}

impl UserClient {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        Self {
            inner: ListController::new(transport, params),
        }
    }
}

#[async_trait]
impl ConsoleClient<User> for UserClient {
    type Error = ConsoleError;

    fn controller(&self) -> &ListController<User> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ConsoleError::Api(e)
    }
}

impl UserClient {
    pub fn users(&self) -> Vec<User> {
        self.inner.items()
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<MutationReceipt, ConsoleError> {
        require(&params.name, "Name")?;
        validate_email(&params.email)?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_user(
        &self,
        id: u64,
        update: UserUpdate,
    ) -> Result<MutationReceipt, ConsoleError> {
        if let Some(name) = &update.name {
            require(name, "Name")?;
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        debug!("Sending request");
        self.inner.update(&id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn assign_role(&self, id: u64, role_id: u64) -> Result<MutationReceipt, ConsoleError> {
        let request = ApiRequest::put(format!("{}/role", User::member_path(&id)))
            .with_json(&json!({ "role_id": role_id }))?;
        self.inner.perform(request).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: u64,
        status: UserStatus,
    ) -> Result<MutationReceipt, ConsoleError> {
        if status == UserStatus::Unknown {
            return Err(ConsoleError::Validation("Cannot assign an unknown status".into()));
        }
        let request = ApiRequest::patch(format!("{}/status", User::member_path(&id)))
            .with_json(&json!({ "status": status }))?;
        self.inner.perform(request).await.map_err(Self::map_error)
    }

    /// Shows only users with `status`, or everyone for `None`.
    #[instrument(skip(self))]
    pub async fn filter_by_status(
        &self,
        status: Option<UserStatus>,
    ) -> Result<Vec<User>, ConsoleError> {
        let patch = match status {
            Some(status) => QueryPatch::new().set("status", status.to_string()),
            None => QueryPatch::new().clear("status"),
        };
        let list = self
            .inner
            .update_query_params(patch)
            .await
            .map_err(Self::map_error)?;
        Ok(list.items)
    }
}

fn validate_email(email: &str) -> Result<(), ConsoleError> {
    require(email, "Email")?;
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(ConsoleError::Validation(format!("{email:?} is not a valid email")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_framework::mock::MockTransport;

    fn client() -> (Arc<MockTransport>, UserClient) {
        let mock = Arc::new(MockTransport::new());
        (mock.clone(), UserClient::new(mock, QueryParams::default()))
    }

    #[test]
    fn email_validation() {
        assert!(validate_email("ada@example.com").is_ok());
        for bad in ["", "ada", "ada@", "@example.com", "ada@example", "a@b@c.d", "ada@.com"] {
            assert!(validate_email(bad).is_err(), "{bad} should be invalid");
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email_without_request() {
        let (mock, users) = client();

        let err = users
            .create_user(UserCreate::new("Ada", "not-an-email"))
            .await
            .unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_set_status_patches_member() {
        let (mock, users) = client();
        mock.expect_patch("/public/users/5/status")
            .return_json(json!({ "success": true }));
        mock.expect_get("/public/users").return_json(json!({
            "data": [{ "id": 5, "name": "Ada", "email": "ada@example.com", "status": "suspended" }],
            "meta": { "total": 1 }
        }));

        users.set_status(5, UserStatus::Suspended).await.unwrap();

        assert_eq!(mock.requests()[0].body, Some(json!({ "status": "suspended" })));
        assert_eq!(users.users()[0].status, UserStatus::Suspended);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unrecognized_status_keeps_the_rest_of_the_page() {
        let (mock, users) = client();
        mock.expect_get("/public/users").return_json(json!({
            "data": [
                { "id": 1, "name": "Ada", "email": "ada@example.com", "status": "active" },
                { "id": 2, "name": "Grace", "email": "grace@example.com", "status": "pending" }
            ],
            "meta": { "total": 2, "current_page": 1, "per_page": 10 }
        }));

        let list = users.refresh().await.unwrap();

        assert_eq!(list.total, 2);
        assert_eq!(list.items.len(), 2);
        assert_eq!(list.items[1].status, UserStatus::Unknown);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unknown_status_cannot_be_assigned() {
        let (mock, users) = client();

        let err = users.set_status(2, UserStatus::Unknown).await.unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_assign_role_failure_is_mapped() {
        let (mock, users) = client();
        mock.expect_put("/public/users/5/role")
            .return_json(json!({ "success": false, "message": "Role not found" }));

        let err = users.assign_role(5, 99).await.unwrap_err();

        assert_eq!(
            err,
            ConsoleError::Api(ApiError::MutationFailed("Role not found".into()))
        );
        assert_eq!(err.user_message(), "Role not found");
        mock.verify();
    }
}
