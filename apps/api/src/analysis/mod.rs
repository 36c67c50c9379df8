// Human-likeness analysis: prompt → model (JSON mode) → typed result.
// All model calls go through llm_client, no direct provider calls here.

pub mod display;
pub mod parser;
pub mod prompts;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::parser::{parse_analysis, AnalysisResult, ParseError};
use crate::analysis::prompts::build_analysis_prompt;
use crate::llm_client::{CompletionModel, CompletionRequest, LlmError};

/// Why an analysis produced no result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model call failed: {0}")]
    ModelCallFailed(#[from] LlmError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Runs the full analysis pipeline on `text`.
pub async fn analyze_text(
    model: &dyn CompletionModel,
    text: &str,
) -> Result<AnalysisResult, AnalysisError> {
    let prompt = build_analysis_prompt(text);
    let raw = model.complete(CompletionRequest::analysis(&prompt)).await?;

    match parse_analysis(&raw) {
        Ok(result) => {
            info!(
                "Analysis complete: human_score={}, improvements={}",
                result.human_score,
                result.improvements.len()
            );
            Ok(result)
        }
        Err(e) => {
            warn!(cause = %e.cause, raw = %e.raw, "Analysis reply was not valid JSON");
            Err(AnalysisError::Parse(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubModel;

    const REPLY: &str = r#"{"human_score": 82, "reason": "Natural phrasing.", "improvements": []}"#;

    #[tokio::test]
    async fn test_analyze_uses_analysis_sampling() {
        let stub = StubModel::replying(REPLY);
        analyze_text(&stub, "The cat sat on the mat.").await.unwrap();

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].temperature, 0.1);
        assert!(calls[0].want_json);
        assert!(calls[0].prompt.contains("The cat sat on the mat."));
    }

    #[tokio::test]
    async fn test_analyze_is_idempotent_against_deterministic_model() {
        let stub = StubModel::replying(REPLY);
        let first = analyze_text(&stub, "The cat sat on the mat.").await.unwrap();
        let second = analyze_text(&stub, "The cat sat on the mat.").await.unwrap();
        assert_eq!(first, second);

        let calls = stub.calls();
        assert_eq!(calls[0].prompt, calls[1].prompt);
    }

    #[tokio::test]
    async fn test_model_failure_surfaces_as_model_call_failed() {
        let stub = StubModel::failing("upstream exploded");
        let err = analyze_text(&stub, "text").await.unwrap_err();
        assert!(matches!(err, AnalysisError::ModelCallFailed(_)));
        assert!(err.to_string().contains("upstream exploded"));
    }

    #[tokio::test]
    async fn test_garbage_reply_surfaces_as_parse_error() {
        let stub = StubModel::replying("I think this is human-written.");
        let err = analyze_text(&stub, "text").await.unwrap_err();
        match err {
            AnalysisError::Parse(e) => assert_eq!(e.raw, "I think this is human-written."),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
