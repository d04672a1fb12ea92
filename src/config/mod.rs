use anyhow::{Context, Result};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::{Args, ProviderKind};

/// Process-wide settings, resolved once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub provider: ProviderKind,
    pub model: Option<String>,
    pub api_base: Option<String>,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3001,
            provider: ProviderKind::Groq,
            model: None,
            api_base: None,
            api_key: None,
            max_tokens: 8192,
            temperature: 0.7,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Defaults, optionally overlaid by a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let text = fs::read_to_string(p)?;
                Self::from_toml(&text).with_context(|| format!("invalid config file {}", p.display()))
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Defaults < file < environment < flags. The API key is looked up last
    /// because its variable name depends on the final provider.
    pub fn resolve<F>(args: &Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::load(args.config.as_deref())?;
        cfg.apply_env(&lookup)?;
        cfg.apply_args(args);
        if let Some(key) = lookup(cfg.provider.api_key_env()).filter(|v| !v.is_empty()) {
            cfg.api_key = Some(key);
        }
        Ok(cfg)
    }

    /// Overlay environment variables. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |k: &str| lookup(k).filter(|v| !v.is_empty());

        if let Some(provider) = set("SITEGEN_PROVIDER") {
            self.provider = match provider.to_ascii_lowercase().as_str() {
                "groq" => ProviderKind::Groq,
                "openai" | "open-ai" => ProviderKind::OpenAI,
                other => anyhow::bail!("SITEGEN_PROVIDER is not a known provider: {other}"),
            };
        }
        if let Some(base) = set("SITEGEN_API_BASE") {
            self.api_base = Some(base);
        }
        if let Some(model) = set("SITEGEN_MODEL") {
            self.model = Some(model);
        }
        if let Some(host) = set("HOST") {
            self.host = host;
        }
        if let Some(port) = set("PORT") {
            self.port = port.parse().with_context(|| format!("PORT is not a valid port: {port}"))?;
        }
        Ok(())
    }

    pub fn apply_args(&mut self, args: &Args) {
        if let Some(h) = &args.host {
            self.host = h.clone();
        }
        if let Some(p) = args.port {
            self.port = p;
        }
        if let Some(k) = args.provider {
            self.provider = k;
        }
        if let Some(m) = &args.model {
            self.model = Some(m.clone());
        }
        if let Some(b) = &args.api_base {
            self.api_base = Some(b.clone());
        }
        if let Some(t) = args.timeout_secs {
            self.timeout_secs = Some(t);
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.provider.default_model())
    }

    pub fn api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(self.provider.default_api_base())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
