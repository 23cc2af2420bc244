//! # Response Envelopes
//!
//! The admin API wraps payloads in several shapes. All shape sniffing lives
//! here so controllers never inspect raw JSON:
//!
//! | Shape | Example |
//! |-------|---------|
//! | Bare array | `[{..}, {..}]` |
//! | Wrapped | `{"success": true, "data": [..], "message": ".."}` |
//! | Paginated | `{"data": [..], "meta": {"total": 42, "current_page": 2, "per_page": 10}}` |
//!
//! `success: false` is a server rejection in every shape.

use crate::error::ApiError;
use crate::transport::server_message;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Pagination block of a paginated envelope. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

/// Items of a list response plus whatever pagination the server sent.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

/// Normalizes a list response.
///
/// Returns [`ApiError::ShapeMismatch`] for anything that is not one of the
/// known shapes and [`ApiError::Rejected`] for `success: false`. Items are
/// decoded one by one; an item that does not decode is logged and skipped
/// while the rest of the page and its `meta` are kept.
pub fn normalize_list<T: DeserializeOwned>(body: Value) -> Result<Page<T>, ApiError> {
    match body {
        Value::Array(items) => Ok(Page {
            items: decode_items(items),
            meta: PageMeta::default(),
        }),
        Value::Object(mut map) => {
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                let message = server_message(&Value::Object(map));
                return Err(ApiError::rejected(None, message));
            }
            let items = match map.remove("data") {
                Some(Value::Array(items)) => items,
                Some(_) => return Err(ApiError::ShapeMismatch("`data` is not an array".into())),
                None => return Err(ApiError::ShapeMismatch("no `data` field".into())),
            };
            let meta = map
                .remove("meta")
                .and_then(|meta| serde_json::from_value(meta).ok())
                .unwrap_or_default();
            Ok(Page {
                items: decode_items(items),
                meta,
            })
        }
        other => Err(ApiError::ShapeMismatch(format!(
            "expected array or object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Normalizes a single-item response: `{success, data: {..}}`, `{data: {..}}`
/// or the bare object.
pub fn normalize_item<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    match body {
        Value::Object(mut map) => {
            if map.get("success").and_then(Value::as_bool) == Some(false) {
                let message = server_message(&Value::Object(map));
                return Err(ApiError::rejected(None, message));
            }
            match map.remove("data") {
                Some(data @ Value::Object(_)) => Ok(serde_json::from_value(data)?),
                Some(_) => Err(ApiError::ShapeMismatch("`data` is not an object".into())),
                None => Ok(serde_json::from_value(Value::Object(map))?),
            }
        }
        other => Err(ApiError::ShapeMismatch(format!(
            "expected object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationReceipt {
    pub message: Option<String>,
    pub data: Option<Value>,
}

/// Fallback text when a write fails without explanation.
pub const GENERIC_MUTATION_FAILURE: &str = "The operation could not be completed.";

impl MutationReceipt {
    /// Interprets a write response.
    ///
    /// A truthy `success` or a non-empty `message` counts as success. An
    /// explicit `success: false` always fails, carrying the message if any.
    pub fn from_response(body: Value) -> Result<Self, ApiError> {
        let Value::Object(mut map) = body else {
            return Err(ApiError::MutationFailed(GENERIC_MUTATION_FAILURE.into()));
        };

        let message = map
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        let success = map.get("success").map(is_truthy);

        match (success, message.is_some()) {
            (Some(true), _) | (None, true) => Ok(Self {
                message,
                data: map.remove("data").filter(|d| !d.is_null()),
            }),
            _ => Err(ApiError::MutationFailed(
                message.unwrap_or_else(|| GENERIC_MUTATION_FAILURE.into()),
            )),
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(index, error = %e, "Skipping list item that does not decode");
                None
            }
        })
        .collect()
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
