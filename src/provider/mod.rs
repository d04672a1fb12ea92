use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Config;
use crate::errors::SiteGenError;
use crate::wire::Instruction;

pub mod openai;

/// One synchronous completion round trip: instruction in, raw model text out.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn complete(&self, ins: &Instruction) -> Result<String, SiteGenError>;

    fn model(&self) -> &str;

    /// Human-readable backend name, reported by the health endpoint.
    fn label(&self) -> &str;
}

pub type DynProvider = Arc<dyn Provider>;

pub fn make_provider(cfg: &Config) -> Result<DynProvider> {
    // Every supported backend speaks the OpenAI chat-completions dialect.
    Ok(Arc::new(openai::ChatCompletions::new(cfg)?))
}
