//! Rendering: a pure function from session state (plus this action's notices)
//! to the widget tree. Nothing outside `SessionState` influences the view.

use serde::Serialize;

use crate::analysis::display::{
    delta_label, score_change_label, score_label, DeltaTone, NO_IMPROVEMENTS_MESSAGE,
};
use crate::analysis::parser::{AnalysisResult, Improvement};
use crate::humanize::styles::available_styles;
use crate::session::state::{SessionState, Stage};
use crate::view::controller::Notice;

pub const ANALYSIS_TITLE: &str = "Analysis Results";
pub const REANALYSIS_TITLE: &str = "Humanized Text Analysis";
pub const SCORE_METRIC_LABEL: &str = "Human-Likeness Score";

/// The whole page as data. Serialized as-is by the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub stage: Stage,
    pub notices: Vec<Notice>,
    pub input_text: String,
    pub analysis: Option<ResultPanel>,
    /// Present once an analysis exists.
    pub humanizer: Option<HumanizerPanel>,
    /// Present once humanized text exists.
    pub humanized: Option<HumanizedPanel>,
    pub reanalysis: Option<ResultPanel>,
}

/// Score metric plus the improvement list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPanel {
    pub title: &'static str,
    pub metric_label: &'static str,
    pub score: i64,
    pub score_label: String,
    pub delta_label: &'static str,
    pub delta_tone: DeltaTone,
    pub reason: String,
    pub improvements: Vec<Improvement>,
    /// Shown instead of the list when there are no improvements.
    pub empty_message: Option<&'static str>,
    /// Only on the re-analysis panel.
    pub score_change: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanizerPanel {
    pub styles: Vec<String>,
    pub selected_style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanizedPanel {
    pub text: String,
}

fn result_panel(title: &'static str, result: &AnalysisResult) -> ResultPanel {
    let (delta, tone) = delta_label(result.human_score);
    ResultPanel {
        title,
        metric_label: SCORE_METRIC_LABEL,
        score: result.human_score,
        score_label: score_label(result.human_score),
        delta_label: delta,
        delta_tone: tone,
        reason: result.reason.clone(),
        improvements: result.improvements.clone(),
        empty_message: result
            .improvements
            .is_empty()
            .then_some(NO_IMPROVEMENTS_MESSAGE),
        score_change: None,
    }
}

/// Builds the view from state. Deterministic: same state and notices, same view.
pub fn render(state: &SessionState, notices: Vec<Notice>) -> View {
    let analysis = state
        .analysis()
        .map(|result| result_panel(ANALYSIS_TITLE, result));

    let humanizer = state.analysis().map(|_| HumanizerPanel {
        styles: available_styles(state.custom_styles()),
        selected_style: state.selected_style().to_string(),
    });

    let humanized = state.humanized_text().map(|text| HumanizedPanel {
        text: text.to_string(),
    });

    let reanalysis = state.reanalysis().map(|result| {
        let mut panel = result_panel(REANALYSIS_TITLE, result);
        panel.score_change = state
            .analysis()
            .map(|original| score_change_label(original.human_score, result.human_score));
        panel
    });

    View {
        stage: state.stage(),
        notices,
        input_text: state.input_text().to_string(),
        analysis,
        humanizer,
        humanized,
        reanalysis,
    }
}
