use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// ========================================
/// Caller-facing request/response protocol
/// ========================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementRequest {
    #[serde(default)]
    pub original_prompt: Option<String>,
    /// Previously returned bundle, relayed to the model as-is.
    #[serde(default)]
    pub current_code: Value,
    #[serde(default)]
    pub refinement: Option<String>,
}

/// Generated website as returned by the model, plus the derived `fullHtml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteBundle {
    pub html: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub css: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub js: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_names")]
    pub components: Vec<String>,
    #[serde(default)]
    pub full_html: String,
    /// Anything else the model chose to include.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Models are loose with optional fields: `null` reads as empty and other
/// scalars keep their JSON text.
fn lenient_text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

/// Keeps the string entries of an array; anything else reads as no components.
fn lenient_names<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub success: bool,
    pub website: WebsiteBundle,
}

impl SiteResponse {
    pub fn ok(website: WebsiteBundle) -> Self {
        Self { success: true, website }
    }
}

#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub success: bool,
    pub error: String,
    pub details: String,
}

#[derive(Debug, Serialize)]
pub struct ClientErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub model: String,
    pub provider: String,
}

/// ========================================
/// Upstream chat-completions protocol
/// ========================================

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub error: Option<UpstreamFault>,
}

impl ChatResponse {
    /// Text of the first choice, or an empty string when the model sent none.
    pub fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpstreamFault {
    #[serde(default)]
    pub message: Option<String>,
}
