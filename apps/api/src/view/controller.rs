//! View controller: the event-driven state machine behind the page.
//!
//! Every user action is an `Event`. `step` applies one event to a session's
//! state and returns the notices it produced; `run`/`run_all` additionally
//! render the resulting view. Model and parse failures stop here: they become
//! notices, never errors.
//!
//! Stages: Idle → Analyzed → Humanized → ReAnalyzed (see `Stage`).

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::analysis::{analyze_text, AnalysisError};
use crate::humanize::humanize_text;
use crate::humanize::styles::is_available;
use crate::llm_client::CompletionModel;
use crate::session::state::SessionState;
use crate::view::render::{render, View};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Event {
    /// Form widgets changed without a button press.
    Edit {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        style: Option<String>,
    },
    Analyze {
        text: String,
    },
    SaveStyle {
        name: String,
        example: String,
    },
    Humanize {
        text: String,
        #[serde(default)]
        style: Option<String>,
    },
    AnalyzeHumanized,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A status message shown above the results for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

pub const EMPTY_INPUT_WARNING: &str = "Please paste some text to analyze.";
pub const INCOMPLETE_STYLE_WARNING: &str =
    "Please provide both a name and an example for your custom style.";
pub const ANALYZE_FIRST_WARNING: &str = "Analyze your text first, then humanize it.";
pub const UNKNOWN_STYLE_WARNING: &str =
    "That style is not available. Choose one from the list or save it as a custom style first.";
pub const HUMANIZE_FIRST_WARNING: &str = "Humanize your text first, then analyze the result.";
pub const ANALYSIS_UNREADABLE: &str =
    "Analysis failed: the model returned a response we could not read. Please try again.";

/// Applies one event to `state`. Never fails: problems become notices.
pub async fn step(
    model: &dyn CompletionModel,
    mut state: SessionState,
    event: Event,
) -> (SessionState, Vec<Notice>) {
    let mut notices = Vec::new();

    match event {
        Event::Edit { text, style } => {
            if let Some(text) = text {
                state.set_input_text(&text);
            }
            // Unknown names are dropped; the selector keeps its previous value.
            if let Some(style) = style.filter(|s| is_available(state.custom_styles(), s)) {
                state.select_style(&style);
            }
        }

        Event::Analyze { text } => {
            state.set_input_text(&text);
            if text.trim().is_empty() {
                notices.push(Notice::warning(EMPTY_INPUT_WARNING));
                return (state, notices);
            }

            state.begin_analysis();
            match analyze_text(model, &text).await {
                Ok(result) => state.set_analysis(Some(result)),
                Err(e) => {
                    state.set_analysis(None);
                    notices.push(analysis_failure_notice("analysis", &e));
                }
            }
        }

        Event::SaveStyle { name, example } => {
            let name = name.trim();
            if name.is_empty() || example.trim().is_empty() {
                notices.push(Notice::warning(INCOMPLETE_STYLE_WARNING));
                return (state, notices);
            }

            let replaced = state.save_custom_style(name, &example);
            info!(
                "Custom style '{name}' saved (replaced existing: {replaced}, {} custom styles)",
                state.custom_styles().len()
            );
            let message = if replaced {
                format!("Custom style '{name}' updated with the new example.")
            } else {
                format!("Custom style '{name}' saved! It is now available in the dropdown.")
            };
            notices.push(Notice::success(message));
        }

        Event::Humanize { text, style } => {
            state.set_input_text(&text);
            if let Some(style) = style.filter(|s| !s.trim().is_empty()) {
                if !is_available(state.custom_styles(), &style) {
                    warn!("Humanize refused: unknown style {style:?}");
                    notices.push(Notice::warning(UNKNOWN_STYLE_WARNING));
                    return (state, notices);
                }
                state.select_style(&style);
            }

            if state.analysis().is_none() {
                notices.push(Notice::warning(ANALYZE_FIRST_WARNING));
                return (state, notices);
            }
            if text.trim().is_empty() {
                notices.push(Notice::warning(EMPTY_INPUT_WARNING));
                return (state, notices);
            }

            state.begin_humanize();
            let style = state.selected_style().to_string();
            match humanize_text(model, &text, &style, state.custom_styles()).await {
                Ok(rewritten) => state.set_humanized(rewritten),
                Err(e) => {
                    error!("Humanize failed: {e}");
                    notices.push(Notice::error(format!(
                        "An error occurred during humanization: {e}"
                    )));
                }
            }
        }

        Event::AnalyzeHumanized => {
            let Some(humanized) = state.humanized_text().map(str::to_string) else {
                notices.push(Notice::warning(HUMANIZE_FIRST_WARNING));
                return (state, notices);
            };

            match analyze_text(model, &humanized).await {
                Ok(result) => state.set_reanalysis(result),
                Err(e) => notices.push(analysis_failure_notice("re-analysis", &e)),
            }
        }

        Event::Refresh => {}
    }

    (state, notices)
}

fn analysis_failure_notice(what: &str, err: &AnalysisError) -> Notice {
    match err {
        AnalysisError::ModelCallFailed(e) => {
            error!("Model call failed during {what}: {e}");
            Notice::error(format!("An error occurred during {what}: {e}"))
        }
        AnalysisError::Parse(_) => {
            // Raw reply already logged by the pipeline; the user gets the generic message.
            warn!("Unreadable model reply during {what}");
            Notice::error(ANALYSIS_UNREADABLE)
        }
    }
}

/// Applies events in order and renders the final state once.
pub async fn run_all<I>(
    model: &dyn CompletionModel,
    mut state: SessionState,
    events: I,
) -> (SessionState, View)
where
    I: IntoIterator<Item = Event>,
{
    let mut notices = Vec::new();
    for event in events {
        let (next, mut produced) = step(model, state, event).await;
        state = next;
        notices.append(&mut produced);
    }
    let view = render(&state, notices);
    (state, view)
}

/// `(state, event) -> (state, view)` for a single event.
pub async fn run(
    model: &dyn CompletionModel,
    state: SessionState,
    event: Event,
) -> (SessionState, View) {
    run_all(model, state, [event]).await
}
