use crate::auth::{AuthService, AuthUser, Credentials};
use console_framework::{ApiError, AsyncState, ResourceHook, Session};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Holds the current user as an observable state.
///
/// Whether anyone is signed in is read from the [`Session`] given to
/// [`new`](AuthController::new), never from process-wide state.
pub struct AuthController {
    service: Arc<dyn AuthService>,
    session: Session,
    user: ResourceHook<AuthUser>,
}

impl AuthController {
    pub fn new(service: Arc<dyn AuthService>, session: Session) -> Self {
        Self {
            service,
            session,
            user: ResourceHook::new("AuthUser.current"),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<AuthUser> {
        self.user.state().into_data()
    }

    pub fn state(&self) -> AsyncState<AuthUser> {
        self.user.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<AsyncState<AuthUser>> {
        self.user.subscribe()
    }

    /// Loads the current user when a token is present. Without one the state
    /// stays `Idle` and no request is made.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<Option<AuthUser>, ApiError> {
        if !self.is_authenticated() {
            debug!("No session, skipping current user lookup");
            self.user.reset();
            return Ok(None);
        }
        let service = Arc::clone(&self.service);
        self.user
            .execute(async move { service.current_user().await })
            .await
            .map(Some)
    }

    #[instrument(skip(self))]
    pub async fn login(&self, credentials: Credentials) -> Result<AuthUser, ApiError> {
        let service = Arc::clone(&self.service);
        self.user
            .execute(async move { service.login(&credentials).await })
            .await
    }

    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.service.logout().await;
        self.user.reset();
        result
    }

    pub fn cancel(&self) {
        self.user.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ApiAuthService;
    use console_framework::mock::MockTransport;
    use console_framework::Status;
    use serde_json::json;

    fn controller(session: Session) -> (Arc<MockTransport>, AuthController) {
        let mock = Arc::new(MockTransport::new());
        let service = Arc::new(ApiAuthService::new(mock.clone(), session.clone()));
        (mock, AuthController::new(service, session))
    }

    #[tokio::test]
    async fn test_initialize_without_token_makes_no_request() {
        let (mock, auth) = controller(Session::new());

        assert_eq!(auth.initialize().await, Ok(None));
        assert_eq!(auth.state().status(), Status::Idle);
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_with_token_loads_user() {
        let (mock, auth) = controller(Session::with_token("abc123"));
        mock.expect_get("/auth/me")
            .return_json(json!({ "data": { "id": 7, "name": "Grace", "email": "grace@example.com" } }));

        let user = auth.initialize().await.unwrap().unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(auth.user(), Some(user));
        mock.verify();
    }

    #[tokio::test]
    async fn test_logout_returns_to_idle() {
        let session = Session::new();
        let (mock, auth) = controller(session.clone());
        mock.expect_post("/auth/login").return_json(json!({
            "token": "t",
            "user": { "id": 1, "name": "Ada", "email": "ada@example.com" }
        }));
        mock.expect_post("/auth/logout").return_json(json!({ "success": true }));

        auth.login(Credentials::new("ada@example.com", "pw")).await.unwrap();
        assert!(auth.is_authenticated());
        assert_eq!(auth.state().status(), Status::Success);

        auth.logout().await.unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(auth.state(), AsyncState::Idle);
    }
}
