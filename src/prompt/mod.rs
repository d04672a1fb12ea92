use crate::wire::{GenerationRequest, Instruction, RefinementRequest};

fn output_schema() -> &'static str {
r#"Return ONLY a valid JSON object (no markdown, no explanation) with this exact structure:
{
  "html": "<complete HTML content for the body>",
  "css": "/* complete CSS styles */",
  "js": "// complete JavaScript code (can be empty string if not needed)",
  "title": "Page Title",
  "description": "Brief description of what was generated",
  "components": ["list", "of", "components", "used"]
}"#
}

fn design_requirements() -> &'static str {
r#"Design requirements:
- Create visually stunning, modern designs
- Use CSS variables for theming
- Ensure fully responsive design (mobile, tablet, desktop)
- Add smooth animations and hover effects
- Use Google Fonts (via @import in CSS) for beautiful typography
- Include a navigation bar (sticky), hero section, main content, and footer
- Generate realistic placeholder content relevant to the user's request
- Use a cohesive color palette with CSS custom properties"#
}

fn code_quality() -> &'static str {
r#"Code quality:
- Write semantic HTML5
- Use CSS Grid and Flexbox for layouts
- Include CSS transitions and keyframe animations
- Make JS code vanilla (no external dependencies unless CDN-linked in HTML)
- Add proper meta tags in HTML head
- Ensure accessibility (alt tags, aria labels, proper heading hierarchy)"#
}

fn component_library() -> &'static str {
r#"Component library to choose from based on context:
- Navigation (sticky, transparent-on-scroll, hamburger mobile menu)
- Hero (full-screen, split-screen, minimal)
- Features/Services grid
- Portfolio/Gallery grid with lightbox
- Testimonials carousel
- Pricing cards
- Contact form with validation
- Team section
- FAQ accordion
- Statistics counter
- Newsletter signup
- Footer with social links"#
}

/// Shared by generation and refinement; never derived from caller input.
pub fn system_prompt() -> String {
    format!(
        r#"You are an expert web developer and designer. Your job is to generate complete, beautiful, production-ready websites based on user descriptions.

When generating a website:
1. {schema}

2. {design}

3. {quality}

4. {library}

Always generate complete, working code. The HTML should be a full document including <!DOCTYPE html> and all head/body tags."#,
        schema = output_schema(),
        design = design_requirements(),
        quality = code_quality(),
        library = component_library(),
    )
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

pub fn user_prompt_generate(req: &GenerationRequest) -> String {
    let prompt = req.prompt.as_deref().unwrap_or_default();
    let mut out = format!("Create a website for the following: \"{prompt}\"\n");
    if let Some(style) = present(&req.style) {
        out.push_str(&format!("Design style preference: {style}\n"));
    }
    if let Some(colors) = present(&req.color_scheme) {
        out.push_str(&format!("Color scheme preference: {colors}\n"));
    }
    out.push_str("\nGenerate a complete, stunning website. Return ONLY the JSON object.");
    out
}

pub fn user_prompt_refine(req: &RefinementRequest) -> String {
    let original = req.original_prompt.as_deref().unwrap_or_default();
    let refinement = req.refinement.as_deref().unwrap_or_default();
    // Value's Display is compact JSON and cannot fail.
    let current = req.current_code.to_string();
    format!(
        "Original website request: \"{original}\"\n\
         Current code: {current}\n\
         Refinement request: \"{refinement}\"\n\
         Apply the refinement and return the complete updated JSON object."
    )
}

pub fn generate_instruction(req: &GenerationRequest) -> Instruction {
    Instruction { system: system_prompt(), user: user_prompt_generate(req) }
}

pub fn refine_instruction(req: &RefinementRequest) -> Instruction {
    Instruction { system: system_prompt(), user: user_prompt_refine(req) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn gen(prompt: &str, style: Option<&str>, colors: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            prompt: Some(prompt.into()),
            style: style.map(String::from),
            color_scheme: colors.map(String::from),
        }
    }

    #[test]
    fn generate_prompt_quotes_the_description_verbatim() {
        let text = user_prompt_generate(&gen("a \"cozy\" bakery", None, None));
        assert_eq!(
            text,
            "Create a website for the following: \"a \"cozy\" bakery\"\n\
             \nGenerate a complete, stunning website. Return ONLY the JSON object."
        );
    }

    #[test]
    fn optional_lines_appear_only_when_set() {
        let both = user_prompt_generate(&gen("gym", Some("brutalist"), Some("neon green")));
        assert!(both.contains("Design style preference: brutalist\n"));
        assert!(both.contains("Color scheme preference: neon green\n"));

        let style_only = user_prompt_generate(&gen("gym", Some("minimal"), None));
        assert!(style_only.contains("Design style preference: minimal"));
        assert!(!style_only.contains("Color scheme"));

        let empty_style = user_prompt_generate(&gen("gym", Some(""), None));
        assert!(!empty_style.contains("Design style"));
    }

    #[test]
    fn generate_prompt_ends_with_json_only_instruction() {
        let text = user_prompt_generate(&gen("portfolio", Some("retro"), None));
        assert!(text.ends_with("Return ONLY the JSON object."));
    }

    #[test]
    fn refine_prompt_embeds_serialized_code() {
        let req = RefinementRequest {
            original_prompt: Some("coffee shop".into()),
            current_code: json!({"html": "<h1>Hi</h1>"}),
            refinement: Some("make it dark".into()),
        };
        let text = user_prompt_refine(&req);
        assert!(text.starts_with("Original website request: \"coffee shop\"\n"));
        assert!(text.contains(r#"Current code: {"html":"<h1>Hi</h1>"}"#));
        assert!(text.contains("Refinement request: \"make it dark\"\n"));
        assert!(text.ends_with("Apply the refinement and return the complete updated JSON object."));
    }

    #[test]
    fn system_prompt_is_static_and_describes_schema() {
        let a = generate_instruction(&gen("x", None, None)).system;
        let b = refine_instruction(&RefinementRequest::default()).system;
        assert_eq!(a, b);
        for field in ["\"html\"", "\"css\"", "\"js\"", "\"title\"", "\"description\"", "\"components\""] {
            assert!(a.contains(field), "missing {field}");
        }
    }
}
