use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OpenAI-compatible chat-completion backends the service knows defaults for.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
}

impl ProviderKind {
    pub fn default_api_base(self) -> &'static str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenAI => "https://api.openai.com/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            ProviderKind::Groq => "llama-3.3-70b-versatile",
            ProviderKind::OpenAI => "gpt-4.1-mini",
        }
    }

    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Name reported by the health endpoint.
    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Groq => "Groq (Free)",
            ProviderKind::OpenAI => "OpenAI",
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "vibe_sitegen", version, about = "HTTP service that turns website descriptions into LLM-generated HTML/CSS/JS bundles")]
pub struct Args {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub api_base: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Optional TOML file layered over the built-in defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub debug: bool,
}
