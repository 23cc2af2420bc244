use console_framework::AdminResource;
use serde::{Deserialize, Serialize};

/// A reusable prompt with `{{variable}}` placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptTemplate {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub content: String,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub is_active: bool,
}

/// Payload for creating a template.
///
/// Leave `variables` empty to have them extracted from `content`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptTemplateCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: String,
    pub variables: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PromptTemplateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl AdminResource for PromptTemplate {
    type Id = u64;
    type Create = PromptTemplateCreate;
    type Update = PromptTemplateUpdate;
    const COLLECTION: &'static str = "/prompt-templates";
}

/// Names of the `{{name}}` placeholders in `content`, in first-seen order
/// and without duplicates.
///
/// Placeholders whose name is not made of letters, digits and `_` are
/// ignored.
pub fn extract_variables(content: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();
    let mut rest = content;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        let name = after[..end].trim();
        let valid = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
        if valid && !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
        rest = &after[end + 2..];
    }
    variables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_order_without_duplicates() {
        let content = "Hi {{name}}, your order {{ order_id }} ships to {{name}}.";
        assert_eq!(extract_variables(content), vec!["name", "order_id"]);
    }

    #[test]
    fn ignores_malformed_placeholders() {
        assert!(extract_variables("no placeholders").is_empty());
        assert!(extract_variables("{{}} and {{two words}}").is_empty());
        assert_eq!(extract_variables("{{a}} then {{unclosed"), vec!["a"]);
    }
}
