//! # Prompt Template Client
//!
//! Provides a high-level API for `/prompt-templates`.
use crate::clients::require;
use crate::error::ConsoleError;
use crate::model::{extract_variables, PromptTemplate, PromptTemplateCreate, PromptTemplateUpdate};
use async_trait::async_trait;
use console_framework::{
    ApiError, ApiTransport, ConsoleClient, ListController, MutationReceipt, QueryParams,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for the prompt template collection.
pub struct PromptTemplateClient {
    inner: ListController<PromptTemplate>,
}

impl PromptTemplateClient {
    pub fn new(transport: Arc<dyn ApiTransport>, params: QueryParams) -> Self {
        Self {
            inner: ListController::new(transport, params),
        }
    }
}

#[async_trait]
impl ConsoleClient<PromptTemplate> for PromptTemplateClient {
    type Error = ConsoleError;

    fn controller(&self) -> &ListController<PromptTemplate> {
        &self.inner
    }

    fn map_error(e: ApiError) -> Self::Error {
        ConsoleError::Api(e)
    }
}

impl PromptTemplateClient {
    pub fn templates(&self) -> Vec<PromptTemplate> {
        self.inner.items()
    }

    /// Creates a template. Empty `variables` are filled from the `{{name}}`
    /// placeholders in `content`.
    #[instrument(skip(self))]
    pub async fn create_template(
        &self,
        mut params: PromptTemplateCreate,
    ) -> Result<MutationReceipt, ConsoleError> {
        require(&params.name, "Name")?;
        require(&params.content, "Content")?;
        if params.variables.is_empty() {
            params.variables = extract_variables(&params.content);
        }
        debug!(variables = ?params.variables, "Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Updates a template. New `content` without `variables` re-extracts them.
    #[instrument(skip(self))]
    pub async fn update_template(
        &self,
        id: u64,
        mut update: PromptTemplateUpdate,
    ) -> Result<MutationReceipt, ConsoleError> {
        if let Some(content) = &update.content {
            require(content, "Content")?;
            if update.variables.is_none() {
                update.variables = Some(extract_variables(content));
            }
        }
        debug!("Sending request");
        self.inner.update(&id, update).await.map_err(Self::map_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_framework::mock::MockTransport;
    use serde_json::json;

    fn client() -> (Arc<MockTransport>, PromptTemplateClient) {
        let mock = Arc::new(MockTransport::new());
        (mock.clone(), PromptTemplateClient::new(mock, QueryParams::default()))
    }

    #[tokio::test]
    async fn test_create_extracts_variables() {
        let (mock, templates) = client();
        mock.expect_post("/prompt-templates").return_json(json!({ "success": true }));
        mock.expect_get("/prompt-templates").return_json(json!([]));

        templates
            .create_template(PromptTemplateCreate {
                name: "Greeting".into(),
                content: "Hello {{customer}}, about {{topic}}".into(),
                ..PromptTemplateCreate::default()
            })
            .await
            .unwrap();

        let body = mock.requests()[0].body.clone().unwrap();
        assert_eq!(body["variables"], json!(["customer", "topic"]));
        mock.verify();
    }

    #[tokio::test]
    async fn test_explicit_variables_are_kept() {
        let (mock, templates) = client();
        mock.expect_put("/prompt-templates/8").return_json(json!({ "success": true }));
        mock.expect_get("/prompt-templates").return_json(json!([]));

        templates
            .update_template(
                8,
                PromptTemplateUpdate {
                    content: Some("Hi {{name}}".into()),
                    variables: Some(vec!["name".into(), "extra".into()]),
                    ..PromptTemplateUpdate::default()
                },
            )
            .await
            .unwrap();

        let body = mock.requests()[0].body.clone().unwrap();
        assert_eq!(body["variables"], json!(["name", "extra"]));
    }
}
