// Humanizing: rewrite text in a predefined or user-defined style.
// The reply is plain prose. It is trimmed, never parsed as JSON.

pub mod prompts;
pub mod styles;

use tracing::info;

use crate::humanize::prompts::build_humanize_prompt;
use crate::humanize::styles::CustomStyles;
use crate::llm_client::{CompletionModel, CompletionRequest, LlmError};

/// Rewrites `text` in `style_name`, matching a custom example when one exists.
pub async fn humanize_text(
    model: &dyn CompletionModel,
    text: &str,
    style_name: &str,
    custom_styles: &CustomStyles,
) -> Result<String, LlmError> {
    let prompt = build_humanize_prompt(text, style_name, custom_styles);
    let rewritten = model.complete(CompletionRequest::rewrite(&prompt)).await?;
    let rewritten = rewritten.trim().to_string();
    if rewritten.is_empty() {
        return Err(LlmError::EmptyContent);
    }

    info!(
        "Humanized {} chars into {} chars (style: {style_name})",
        text.chars().count(),
        rewritten.chars().count()
    );
    Ok(rewritten)
}
