use std::sync::Arc;

use crate::llm_client::CompletionModel;
use crate::session::store::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The model every session talks to. `LlmClient` in production, a stub in tests.
    pub llm: Arc<dyn CompletionModel>,
    pub sessions: SessionStore,
}
