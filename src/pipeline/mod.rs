use tracing::info;

use crate::errors::SiteGenError;
use crate::log;
use crate::normalize;
use crate::prompt;
use crate::provider::Provider;
use crate::wire::{GenerationRequest, Instruction, RefinementRequest, WebsiteBundle};

fn require(field: &Option<String>, message: &str) -> Result<(), SiteGenError> {
    match field.as_deref() {
        Some(v) if !v.is_empty() => Ok(()),
        _ => Err(SiteGenError::Validation(message.to_string())),
    }
}

pub fn validate_generate(req: &GenerationRequest) -> Result<(), SiteGenError> {
    require(&req.prompt, "Prompt is required")
}

pub fn validate_refine(req: &RefinementRequest) -> Result<(), SiteGenError> {
    require(&req.original_prompt, "Original prompt is required")?;
    require(&req.refinement, "Refinement is required")
}

/// Description in, complete website out. Validation happens before any network call.
pub async fn generate(provider: &dyn Provider, req: &GenerationRequest) -> Result<WebsiteBundle, SiteGenError> {
    validate_generate(req)?;
    run("generate", provider, &prompt::generate_instruction(req)).await
}

/// Applies a refinement to previously generated code.
pub async fn refine(provider: &dyn Provider, req: &RefinementRequest) -> Result<WebsiteBundle, SiteGenError> {
    validate_refine(req)?;
    run("refine", provider, &prompt::refine_instruction(req)).await
}

async fn run(stage: &str, provider: &dyn Provider, ins: &Instruction) -> Result<WebsiteBundle, SiteGenError> {
    log::dump_instruction(stage, ins);
    let raw = provider.complete(ins).await?;
    log::dump_reply(stage, &raw);
    let site = normalize::parse_website(&raw)?;
    info!(
        stage,
        title = %site.title,
        components = site.components.len(),
        bytes = site.full_html.len(),
        "website ready"
    );
    Ok(site)
}
