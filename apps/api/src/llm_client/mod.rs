/// LLM Client: the single point of entry for all model calls in AuthentiText.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Everything goes through `CompletionModel`, which `LlmClient` implements
/// against an OpenAI-compatible chat completions endpoint.
///
/// No retry or backoff: every failure is terminal for the action that caused it.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;
#[cfg(test)]
pub mod testing;

/// The model used for all calls. Hardcoded to keep scoring comparable across sessions.
pub const MODEL: &str = "gpt-3.5-turbo";

/// Sampling for analysis: near-deterministic scoring.
pub const ANALYSIS_TEMPERATURE: f32 = 0.1;
/// Sampling for rewriting: creative but bounded.
pub const REWRITE_TEMPERATURE: f32 = 0.75;
pub const REWRITE_TOP_P: f32 = 0.9;
pub const REWRITE_MAX_TOKENS: u32 = 2048;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request parameter: {0}")]
    InvalidParameter(String),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One completion call. Always sent as a single user message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Ask the provider for a JSON object response. The reply is still untrusted text.
    pub want_json: bool,
}

impl<'a> CompletionRequest<'a> {
    /// Preset for the analysis path: low temperature, JSON response mode.
    pub fn analysis(prompt: &'a str) -> Self {
        Self {
            prompt,
            temperature: ANALYSIS_TEMPERATURE,
            top_p: None,
            max_output_tokens: None,
            want_json: true,
        }
    }

    /// Preset for the humanize path: plain prose out.
    pub fn rewrite(prompt: &'a str) -> Self {
        Self {
            prompt,
            temperature: REWRITE_TEMPERATURE,
            top_p: Some(REWRITE_TOP_P),
            max_output_tokens: Some(REWRITE_MAX_TOKENS),
            want_json: false,
        }
    }

    /// Rejects sampling values the provider would refuse.
    pub fn validate(&self) -> Result<(), LlmError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidParameter(format!(
                "temperature {} is outside [0, 2]",
                self.temperature
            )));
        }
        if let Some(top_p) = self.top_p {
            if !(top_p > 0.0 && top_p <= 1.0) {
                return Err(LlmError::InvalidParameter(format!(
                    "top_p {top_p} is outside (0, 1]"
                )));
            }
        }
        if self.max_output_tokens == Some(0) {
            return Err(LlmError::InvalidParameter(
                "max_output_tokens must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Anything that can turn a prompt into raw model output.
///
/// Carried in `AppState` as `Arc<dyn CompletionModel>` so tests can swap in a stub.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the content of the first choice, if any.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl<'a> ChatRequest<'a> {
    fn from_completion(request: &CompletionRequest<'a>) -> Self {
        Self {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: request.prompt,
            }],
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_output_tokens,
            response_format: request.want_json.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

/// The HTTP-backed model client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint: format!("{base_url}/chat/completions"),
        }
    }

    /// Makes a raw call to the provider, returning the full response object.
    pub async fn call(&self, request: CompletionRequest<'_>) -> Result<ChatResponse, LlmError> {
        request.validate()?;
        let body = ChatRequest::from_completion(&request);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }
        Ok(chat_response)
    }
}

#[async_trait]
impl CompletionModel for LlmClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_analysis_preset() {
        let req = CompletionRequest::analysis("p");
        assert_eq!(req.temperature, 0.1);
        assert!(req.want_json);
        assert_eq!(req.top_p, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rewrite_preset() {
        let req = CompletionRequest::rewrite("p");
        assert_eq!(req.temperature, 0.75);
        assert_eq!(req.top_p, Some(0.9));
        assert_eq!(req.max_output_tokens, Some(2048));
        assert!(!req.want_json);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_temperature_out_of_range_rejected() {
        let mut req = CompletionRequest::analysis("p");
        req.temperature = 2.5;
        assert!(matches!(req.validate(), Err(LlmError::InvalidParameter(_))));
        req.temperature = -0.1;
        assert!(matches!(req.validate(), Err(LlmError::InvalidParameter(_))));
    }

    #[test]
    fn test_top_p_out_of_range_rejected() {
        let mut req = CompletionRequest::rewrite("p");
        req.top_p = Some(0.0);
        assert!(matches!(req.validate(), Err(LlmError::InvalidParameter(_))));
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_network_call() {
        // Unroutable endpoint: reaching the network would surface as Http, not InvalidParameter.
        let client = LlmClient::new("sk-test".to_string(), "http://127.0.0.1:1");
        let mut req = CompletionRequest::analysis("p");
        req.temperature = 3.0;
        let err = client.complete(req).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidParameter(_)));
    }

    #[test]
    fn test_json_mode_serializes_response_format() {
        let body = ChatRequest::from_completion(&CompletionRequest::analysis("hello"));
        let value: Value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], MODEL);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["response_format"]["type"], "json_object");
        assert!(value.get("top_p").is_none());
        assert!(value.get("max_tokens").is_none());
    }

    #[test]
    fn test_rewrite_serializes_sampling_fields() {
        let body = ChatRequest::from_completion(&CompletionRequest::rewrite("hello"));
        let value: Value = serde_json::to_value(&body).unwrap();
        assert!(value.get("response_format").is_none());
        assert_eq!(value["max_tokens"], 2048);
        assert!((value["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_response_text_extracts_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"hi there"}}],
                       "usage":{"prompt_tokens":3,"completion_tokens":2}}"#;
        let resp: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), Some("hi there"));
    }

    #[test]
    fn test_response_text_none_when_blank_or_missing() {
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"  "}}]}"#).unwrap();
        assert_eq!(blank.text(), None);
        let none: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(none.text(), None);
    }
}
