use crate::model::RoleSummary;
use async_trait::async_trait;
use console_framework::{normalize_item, ApiError, ApiRequest, ApiTransport, Session};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Email and password sent to `/auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The signed-in account as reported by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<RoleSummary>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(alias = "access_token")]
    token: String,
    user: AuthUser,
}

/// Operations of the external authentication service.
#[async_trait]
pub trait AuthService: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthUser, ApiError>;

    /// Ends the session. The local token is dropped even if the call fails.
    async fn logout(&self) -> Result<(), ApiError>;

    async fn current_user(&self) -> Result<AuthUser, ApiError>;

    fn is_authenticated(&self) -> bool;
}

/// [`AuthService`] backed by the admin API.
#[derive(Clone)]
pub struct ApiAuthService {
    transport: Arc<dyn ApiTransport>,
    session: Session,
}

impl ApiAuthService {
    pub fn new(transport: Arc<dyn ApiTransport>, session: Session) -> Self {
        Self { transport, session }
    }
}

#[async_trait]
impl AuthService for ApiAuthService {
    #[instrument(skip(self))]
    async fn login(&self, credentials: &Credentials) -> Result<AuthUser, ApiError> {
        debug!("Sending request");
        let request = ApiRequest::post("/auth/login").with_json(credentials)?;
        let body = self.transport.send(request).await?;
        let LoginResponse { token, user } = normalize_item(body)?;

        self.session.set_token(token);
        info!(user_id = user.id, "Logged in");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), ApiError> {
        let result = self.transport.send(ApiRequest::post("/auth/logout")).await;
        self.session.clear();
        match result {
            Ok(_) => {
                info!("Logged out");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Logout request failed, session cleared locally");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<AuthUser, ApiError> {
        let body = self.transport.send(ApiRequest::get("/auth/me")).await?;
        normalize_item(body)
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_framework::mock::MockTransport;
    use serde_json::json;

    fn service() -> (Arc<MockTransport>, Session, ApiAuthService) {
        let mock = Arc::new(MockTransport::new());
        let session = Session::new();
        let service = ApiAuthService::new(mock.clone(), session.clone());
        (mock, session, service)
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let (mock, session, service) = service();
        mock.expect_post("/auth/login").return_json(json!({
            "success": true,
            "data": {
                "token": "abc123",
                "user": { "id": 1, "name": "Ada", "email": "ada@example.com" }
            }
        }));

        let user = service
            .login(&Credentials::new("ada@example.com", "secret"))
            .await
            .unwrap();

        assert_eq!(user.name, "Ada");
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert!(service.is_authenticated());
        assert_eq!(
            mock.requests()[0].body,
            Some(json!({ "email": "ada@example.com", "password": "secret" }))
        );
    }

    #[tokio::test]
    async fn test_rejected_login_leaves_session_empty() {
        let (mock, session, service) = service();
        mock.expect_post("/auth/login").return_err(ApiError::rejected(
            Some(401),
            Some("Invalid credentials".into()),
        ));

        let err = service
            .login(&Credentials::new("ada@example.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_on_failure() {
        let (mock, session, service) = service();
        session.set_token("abc123");
        mock.expect_post("/auth/logout")
            .return_err(ApiError::Network("connection reset".into()));

        assert!(service.logout().await.is_err());
        assert!(!session.is_authenticated());
    }

    #[test]
    fn credentials_debug_hides_password() {
        let debug = format!("{:?}", Credentials::new("a@b.c", "hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
