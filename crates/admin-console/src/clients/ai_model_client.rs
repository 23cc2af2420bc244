//! # AI Model Client
//!
//! Provides a high-level API for `/ai-models`, including choosing the default
//! model and probing a model's connection.
use crate::clients::require;
use crate::error::ConsoleError;
use crate::model::{AiModel, AiModelCreate, AiModelUpdate};
use async_trait::async_trait;
use console_framework::{
    AdminResource, ApiError, ApiRequest, ApiTransport, AsyncState, ConsoleClient, ListController,
    MutationReceipt, QueryParams, ResourceHook,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Accepted sampling temperature range.
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Client for the AI model collection.
pub struct AiModelClient {
    inner: ListController<AiModel>,
    transport: Arc<dyn ApiTransport>,
    connection: ResourceHook<MutationReceipt>,
}

impl AiModelClient {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        Self {
            inner: ListController::new(Arc::clone(&transport), params),
            transport,
            connection: ResourceHook::new("AiModel.test"),
        }
    }
}

#[async_trait]
impl ConsoleClient<AiModel> for AiModelClient {
    type Error = ConsoleError;

    fn controller(&self) -> &ListController<AiModel> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ConsoleError::Api(e)
    }
}

impl AiModelClient {
    pub fn models(&self) -> Vec<AiModel> {
        self.inner.items()
    }

    /// The model marked as default in the last read.
    pub fn default_model(&self) -> Option<AiModel> {
        self.inner.items().into_iter().find(|m| m.is_default)
    }

    #[instrument(skip(self))]
    pub async fn create_model(
        &self,
        params: AiModelCreate,
    ) -> Result<MutationReceipt, ConsoleError> {
        require(&params.name, "Name")?;
        require(&params.provider, "Provider")?;
        require(&params.model_id, "Model ID")?;
        validate_temperature(params.temperature)?;
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_model(
        &self,
        id: u64,
        update: AiModelUpdate,
    ) -> Result<MutationReceipt, ConsoleError> {
        if let Some(name) = &update.name {
            require(name, "Name")?;
        }
        validate_temperature(update.temperature)?;
        debug!("Sending request");
        self.inner.update(&id, update).await.map_err(Self::map_error)
    }

    /// Makes `id` the default model. The server unsets the previous one.
    #[instrument(skip(self))]
    pub async fn set_default(&self, id: u64) -> Result<MutationReceipt, ConsoleError> {
        let request = ApiRequest::post(format!("{}/default", AiModel::member_path(&id)));
        self.inner.perform(request).await.map_err(Self::map_error)
    }

    /// Asks the server to call the model's provider once.
    ///
    /// Does not reload the list.
    #[instrument(skip(self))]
    pub async fn test_connection(&self, id: u64) -> Result<MutationReceipt, ConsoleError> {
        let request = ApiRequest::post(format!("{}/test", AiModel::member_path(&id)));
        let transport = Arc::clone(&self.transport);
        let receipt = self
            .connection
            .execute(async move { MutationReceipt::from_response(transport.send(request).await?) })
            .await
            .map_err(Self::map_error)?;
        info!(model_id = id, "Connection test passed");
        Ok(receipt)
    }

    pub fn connection_state(&self) -> AsyncState<MutationReceipt> {
        self.connection.state()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
        self.connection.cancel();
    }
}

fn validate_temperature(temperature: Option<f32>) -> Result<(), ConsoleError> {
    match temperature {
        Some(t) if !TEMPERATURE_RANGE.contains(&t) => Err(ConsoleError::Validation(format!(
            "Temperature must be between {} and {}, got {t}",
            TEMPERATURE_RANGE.start(),
            TEMPERATURE_RANGE.end()
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_framework::mock::MockTransport;
    use console_framework::Status;
    use serde_json::json;

    fn client() -> (Arc<MockTransport>, AiModelClient) {
        let mock = Arc::new(MockTransport::new());
        (mock.clone(), AiModelClient::new(mock, QueryParams::default()))
    }

    #[tokio::test]
    async fn test_set_default_reloads_models() {
        let (mock, models) = client();
        mock.expect_post("/ai-models/2/default")
            .return_json(json!({ "message": "Default model updated" }));
        mock.expect_get("/ai-models").return_json(json!([
            { "id": 1, "name": "Small", "provider": "openai", "model": "gpt-4o-mini" },
            { "id": 2, "name": "Large", "provider": "anthropic", "model_id": "claude", "is_default": true }
        ]));

        models.set_default(2).await.unwrap();

        assert_eq!(models.default_model().map(|m| m.id), Some(2));
        assert_eq!(models.models()[0].model_id, "gpt-4o-mini");
        mock.verify();
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported_without_reload() {
        let (mock, models) = client();
        mock.expect_post("/ai-models/1/test")
            .return_json(json!({ "success": false, "message": "Invalid API key" }));

        let err = models.test_connection(1).await.unwrap_err();

        assert_eq!(err.user_message(), "Invalid API key");
        assert_eq!(models.connection_state().status(), Status::Error);
        mock.verify();
    }

    #[tokio::test]
    async fn test_out_of_range_temperature_is_rejected() {
        let (mock, models) = client();

        let err = models
            .create_model(AiModelCreate {
                name: "Large".into(),
                provider: "anthropic".into(),
                model_id: "claude".into(),
                temperature: Some(3.5),
                ..AiModelCreate::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ConsoleError::Validation(_)));
        assert!(mock.requests().is_empty());
    }
}
