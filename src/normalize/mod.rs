use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::errors::SiteGenError;
use crate::wire::WebsiteBundle;

const DOCTYPE_MARKER: &str = "<!DOCTYPE";

fn json_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```json\n?(.*?)\n?```").expect("static regex"))
}

fn any_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)```\n?(.*?)\n?```").expect("static regex"))
}

/// Picks the JSON payload out of a model reply.
///
/// A `json`-tagged fence wins over an untagged one, and either wins over the
/// raw text. Matching is non-greedy, so with several fences the first one is
/// used.
pub fn extract_json_payload(raw: &str) -> &str {
    for re in [json_fence(), any_fence()] {
        if let Some(inner) = re.captures(raw).and_then(|c| c.get(1)) {
            return inner.as_str();
        }
    }
    raw
}

/// Builds the standalone document used when the model returned only body markup.
pub fn synthesize_document(bundle: &WebsiteBundle) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{title}</title>
  <style>{css}</style>
</head>
<body>
{html}
<script>{js}</script>
</body>
</html>"#,
        title = bundle.title,
        css = bundle.css,
        html = bundle.html,
        js = bundle.js,
    )
}

/// Turns raw completion text into a bundle whose `full_html` is a complete document.
pub fn parse_website(raw: &str) -> Result<WebsiteBundle, SiteGenError> {
    let payload = extract_json_payload(raw);
    let value: Value = serde_json::from_str(payload).map_err(SiteGenError::Parse)?;

    let obj = value
        .as_object()
        .ok_or_else(|| SiteGenError::Schema(format!("expected a JSON object, got {}", kind_of(&value))))?;
    match obj.get("html") {
        Some(Value::String(_)) => {}
        Some(other) => {
            return Err(SiteGenError::Schema(format!("`html` must be a string, got {}", kind_of(other))))
        }
        None => return Err(SiteGenError::Schema("missing `html` field".into())),
    }

    let mut bundle: WebsiteBundle =
        serde_json::from_value(value).map_err(|e| SiteGenError::Schema(e.to_string()))?;

    bundle.full_html = if bundle.html.contains(DOCTYPE_MARKER) {
        bundle.html.clone()
    } else {
        synthesize_document(&bundle)
    };
    Ok(bundle)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
