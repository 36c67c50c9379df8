//! Deterministic stand-in for the provider, used by unit and router tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionModel, CompletionRequest, LlmError};

/// What the stub should answer for one call.
pub enum StubReply {
    Text(String),
    Fail(String),
}

/// A recorded call, kept for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub want_json: bool,
}

/// Replies from a queue; once only one reply is left it is repeated forever.
pub struct StubModel {
    replies: Mutex<VecDeque<StubReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl StubModel {
    pub fn new(replies: Vec<StubReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        Self::new(vec![StubReply::Text(text.to_string())])
    }

    pub fn sequence(texts: &[&str]) -> Self {
        Self::new(
            texts
                .iter()
                .map(|t| StubReply::Text(t.to_string()))
                .collect(),
        )
    }

    pub fn failing(message: &str) -> Self {
        Self::new(vec![StubReply::Fail(message.to_string())])
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionModel for StubModel {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
        request.validate()?;
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: request.prompt.to_string(),
            temperature: request.temperature,
            top_p: request.top_p,
            max_output_tokens: request.max_output_tokens,
            want_json: request.want_json,
        });

        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().map(|r| match r {
                StubReply::Text(t) => StubReply::Text(t.clone()),
                StubReply::Fail(m) => StubReply::Fail(m.clone()),
            })
        };

        match reply {
            Some(StubReply::Text(text)) => Ok(text),
            Some(StubReply::Fail(message)) => Err(LlmError::Api {
                status: 500,
                message,
            }),
            None => Err(LlmError::EmptyContent),
        }
    }
}
