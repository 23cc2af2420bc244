use crate::auth::{ApiAuthService, AuthController};
use crate::clients::{
    ActivityLogClient, AiModelClient, PermissionClient, PromptTemplateClient, RoleClient,
    UserClient,
};
use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use console_framework::{ApiTransport, ConsoleClient, HttpTransport, Session};
use std::sync::Arc;
use tracing::info;

/// Owns the session, the auth controller and one client per collection.
pub struct ConsoleSystem {
    pub config: ConsoleConfig,
    pub session: Session,
    pub auth: AuthController,
    pub roles: RoleClient,
    pub users: UserClient,
    pub permissions: PermissionClient,
    pub activity_logs: ActivityLogClient,
    pub ai_models: AiModelClient,
    pub prompt_templates: PromptTemplateClient,
}

impl ConsoleSystem {
    /// Connects to `config.api_base_url` over HTTP.
    pub fn new(config: ConsoleConfig) -> Result<Self, ConsoleError> {
        let session = Session::new();
        let transport =
            HttpTransport::new(config.api_base_url.clone(), config.timeout(), session.clone())?;
        info!(base_url = transport.base_url(), "Console system created");
        Ok(Self::with_transport(config, Arc::new(transport), session))
    }

    /// Wires every client to `transport`. `session` must be the one the
    /// transport reads its token from.
    pub fn with_transport(
        config: ConsoleConfig,
        transport: Arc<dyn ApiTransport>,
        session: Session,
    ) -> Self {
        let params = config.query_params();
        let auth_service = Arc::new(ApiAuthService::new(Arc::clone(&transport), session.clone()));

        Self {
            auth: AuthController::new(auth_service, session.clone()),
            roles: RoleClient::new(Arc::clone(&transport), params.clone()),
            users: UserClient::new(Arc::clone(&transport), params.clone()),
            permissions: PermissionClient::new(Arc::clone(&transport), params.clone()),
            activity_logs: ActivityLogClient::new(Arc::clone(&transport), params.clone()),
            ai_models: AiModelClient::new(Arc::clone(&transport), params.clone()),
            prompt_templates: PromptTemplateClient::new(transport, params),
            session,
            config,
        }
    }

    /// Cancels every in-flight request.
    pub fn cancel_all(&self) {
        self.auth.cancel();
        self.roles.controller().cancel();
        self.users.controller().cancel();
        self.permissions.cancel();
        self.activity_logs.controller().cancel();
        self.ai_models.cancel();
        self.prompt_templates.controller().cancel();
    }

    pub async fn shutdown(self) -> Result<(), ConsoleError> {
        info!("Shutting down console system");
        self.cancel_all();
        info!(authenticated = self.session.is_authenticated(), "Console system stopped");
        Ok(())
    }
}
