//! Response parser: turns the model's JSON reply into a typed `AnalysisResult`.
//!
//! This is the ONE place where missing keys are defaulted:
//! `human_score` → 0, `reason` → "", `improvements` → [], `point`/`explanation` → "".
//! The score is not range-checked here; the prompt asks the model for 0–100.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A single improvement suggestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Improvement {
    pub point: String,
    pub explanation: String,
}

/// Typed analysis record. Replaced wholesale on every analysis call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// Whole or fractional JSON numbers; fractions are rounded.
    #[serde(deserialize_with = "score_from_number")]
    pub human_score: i64,
    pub reason: String,
    pub improvements: Vec<Improvement>,
}

/// The model reply could not be decoded. Keeps the raw text for diagnostics;
/// it is never shown to the user.
#[derive(Debug, Error)]
#[error("could not decode analysis reply: {cause}")]
pub struct ParseError {
    pub raw: String,
    pub cause: String,
}

fn score_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if !value.is_finite() {
        return Err(serde::de::Error::custom("human_score is not a finite number"));
    }
    Ok(value.round() as i64)
}

/// Decodes a raw model reply. Never panics.
pub fn parse_analysis(raw: &str) -> Result<AnalysisResult, ParseError> {
    let text = strip_json_fences(raw);
    serde_json::from_str::<AnalysisResult>(text).map_err(|e| ParseError {
        raw: raw.to_string(),
        cause: e.to_string(),
    })
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
