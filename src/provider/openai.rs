use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::errors::SiteGenError;
use crate::wire::{ChatMessage, ChatRequest, ChatResponse, Instruction};

/// Client for an OpenAI-compatible `/chat/completions` endpoint (Groq by default).
pub struct ChatCompletions {
    client: Client,
    url: String,
    api_key: Option<String>,
    model: String,
    label: String,
    max_tokens: u32,
    temperature: f32,
}

impl ChatCompletions {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = cfg.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            url: format!("{}/chat/completions", cfg.api_base().trim_end_matches('/')),
            api_key: cfg.api_key.clone(),
            model: cfg.model().to_string(),
            label: cfg.provider.label().to_string(),
            max_tokens: cfg.max_tokens,
            temperature: cfg.temperature,
        })
    }
}

#[async_trait]
impl super::Provider for ChatCompletions {
    async fn complete(&self, ins: &Instruction) -> Result<String, SiteGenError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: &ins.system },
                ChatMessage { role: "user", content: &ins.user },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!(url = %self.url, model = %self.model, "POST chat completion");

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| SiteGenError::Upstream(format!("request to {} failed: {e}", self.url)))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| SiteGenError::Upstream(format!("reading response body failed: {e}")))?;

        debug!(%status, bytes = text.len(), "completion response received");

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| SiteGenError::Upstream(format!("unreadable response ({status}): {e}")))?;

        // An error payload wins over the status line; it carries the useful message.
        if let Some(fault) = &parsed.error {
            let msg = fault.message.clone().unwrap_or_else(|| format!("upstream returned {status}"));
            return Err(SiteGenError::Upstream(msg));
        }
        if !status.is_success() {
            return Err(SiteGenError::Upstream(format!("upstream returned {status}")));
        }

        Ok(parsed.first_content())
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn label(&self) -> &str {
        &self.label
    }
}
