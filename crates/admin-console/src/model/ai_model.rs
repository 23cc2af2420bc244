use console_framework::AdminResource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A language model the backend can route prompts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiModel {
    pub id: u64,
    pub name: String,
    pub provider: String,
    #[serde(alias = "model")]
    pub model_id: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Payload for registering a model.
#[derive(Clone, Default, Serialize)]
pub struct AiModelCreate {
    pub name: String,
    pub provider: String,
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    pub is_active: bool,
}

impl fmt::Debug for AiModelCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AiModelCreate")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("model_id", &self.model_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("is_active", &self.is_active)
            .finish()
    }
}

/// Payload for updating a model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AiModelUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AdminResource for AiModel {
    type Id = u64;
    type Create = AiModelCreate;
    type Update = AiModelUpdate;
    const COLLECTION: &'static str = "/ai-models";
}
