//! Axum route handlers for the page and the session JSON API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::session::store::SessionHandle;
use crate::state::AppState;
use crate::view::controller::{run_all, Event};
use crate::view::page::render_page;
use crate::view::render::{render, View};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Everything the page form posts. Which fields matter depends on `action`.
#[derive(Debug, Default, Deserialize)]
pub struct FormSubmission {
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub style_name: String,
    #[serde(default)]
    pub style_example: String,
}

impl FormSubmission {
    /// Widget values first, then the button that was pressed.
    pub fn into_events(self) -> Result<Vec<Event>, AppError> {
        let text = self.text.unwrap_or_default();
        let edit = Event::Edit {
            text: Some(text.clone()),
            style: self.style.clone(),
        };

        let action = match self.action.as_deref().unwrap_or("refresh") {
            "analyze" => Event::Analyze { text },
            "save_style" => Event::SaveStyle {
                name: self.style_name,
                example: self.style_example,
            },
            "humanize" => Event::Humanize {
                text,
                style: self.style,
            },
            "analyze_humanized" => Event::AnalyzeHumanized,
            "refresh" => Event::Refresh,
            other => {
                return Err(AppError::Validation(format!("Unknown action '{other}'")));
            }
        };

        Ok(vec![edit, action])
    }
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub view: View,
}

// ────────────────────────────────────────────────────────────────────────────
// Shared session plumbing
// ────────────────────────────────────────────────────────────────────────────

async fn find_session(state: &AppState, session_id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))
}

/// Runs events against one session. A session already mid-action is rejected, not queued.
async fn apply_events(
    state: &AppState,
    session_id: Uuid,
    events: Vec<Event>,
) -> Result<View, AppError> {
    let handle = find_session(state, session_id).await?;
    let mut guard = handle.try_lock().map_err(|_| AppError::Busy)?;

    // Work on a copy so an abandoned request leaves the stored state untouched.
    let (next, view) = run_all(state.llm.as_ref(), guard.clone(), events).await;
    *guard = next;
    Ok(view)
}

async fn current_view(state: &AppState, session_id: Uuid) -> Result<View, AppError> {
    apply_events(state, session_id, vec![Event::Refresh]).await
}

// ────────────────────────────────────────────────────────────────────────────
// Page handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// Starts a fresh session and sends the browser to its page.
pub async fn handle_index(State(state): State<AppState>) -> Redirect {
    let (session_id, _) = state.sessions.create().await;
    Redirect::to(&format!("/s/{session_id}"))
}

/// GET /s/:id
///
/// A reload while an action is running waits for it and shows its outcome.
pub async fn handle_page(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let handle = find_session(&state, session_id).await?;
    let session = handle.lock().await;
    let view = render(&session, Vec::new());
    Ok(Html(render_page(session_id, &view)))
}

/// POST /s/:id
///
/// One button press: applies the form's widget values and action, re-renders the page.
pub async fn handle_form(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Form(submission): Form<FormSubmission>,
) -> Result<Html<String>, AppError> {
    let events = submission.into_events()?;
    let view = apply_events(&state, session_id, events).await?;
    Ok(Html(render_page(session_id, &view)))
}

// ────────────────────────────────────────────────────────────────────────────
// JSON API handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let (session_id, handle) = state.sessions.create().await;
    let view = render(&*handle.lock().await, Vec::new());
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse { session_id, view }),
    )
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<View>, AppError> {
    Ok(Json(current_view(&state, session_id).await?))
}

/// POST /api/v1/sessions/:id/events
pub async fn handle_event(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(event): Json<Event>,
) -> Result<Json<View>, AppError> {
    Ok(Json(apply_events(&state, session_id, vec![event]).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.end(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {session_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_analyze_maps_to_edit_then_analyze() {
        let form = FormSubmission {
            action: Some("analyze".into()),
            text: Some("hello".into()),
            ..Default::default()
        };
        let events = form.into_events().unwrap();
        assert_eq!(
            events,
            vec![
                Event::Edit {
                    text: Some("hello".into()),
                    style: None
                },
                Event::Analyze {
                    text: "hello".into()
                }
            ]
        );
    }

    #[test]
    fn test_form_save_style_keeps_draft_text() {
        let form = FormSubmission {
            action: Some("save_style".into()),
            text: Some("draft".into()),
            style_name: "Formal".into(),
            style_example: "Dear Sir,".into(),
            ..Default::default()
        };
        let events = form.into_events().unwrap();
        assert!(matches!(&events[0], Event::Edit { text: Some(t), .. } if t == "draft"));
        assert_eq!(
            events[1],
            Event::SaveStyle {
                name: "Formal".into(),
                example: "Dear Sir,".into()
            }
        );
    }

    #[test]
    fn test_form_without_action_refreshes() {
        let events = FormSubmission::default().into_events().unwrap();
        assert_eq!(events[1], Event::Refresh);
    }

    #[test]
    fn test_form_unknown_action_rejected() {
        let form = FormSubmission {
            action: Some("delete_everything".into()),
            ..Default::default()
        };
        assert!(matches!(form.into_events(), Err(AppError::Validation(_))));
    }
}
