//! Per-session state: everything the page shows is derived from this struct.

use serde::Serialize;

use crate::analysis::parser::AnalysisResult;
use crate::humanize::styles::{default_style, CustomStyles};

/// Where the session is in the analyze → humanize → re-analyze flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Idle,
    Analyzed,
    Humanized,
    ReAnalyzed,
}

/// One user's session. Fresh sessions start from `Default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Last text submitted in the input box, echoed back into the form.
    input_text: String,
    /// Last style picked in the selector.
    selected_style: Option<String>,
    analysis: Option<AnalysisResult>,
    humanized_text: Option<String>,
    reanalysis: Option<AnalysisResult>,
    custom_styles: CustomStyles,
}

impl SessionState {
    pub fn stage(&self) -> Stage {
        match (&self.analysis, &self.humanized_text, &self.reanalysis) {
            (None, _, _) => Stage::Idle,
            (Some(_), None, _) => Stage::Analyzed,
            (Some(_), Some(_), None) => Stage::Humanized,
            (Some(_), Some(_), Some(_)) => Stage::ReAnalyzed,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn set_input_text(&mut self, text: &str) {
        self.input_text = text.to_string();
    }

    /// The style the selector should show, falling back to the first predefined one.
    pub fn selected_style(&self) -> &str {
        self.selected_style.as_deref().unwrap_or(default_style())
    }

    pub fn select_style(&mut self, style: &str) {
        self.selected_style = Some(style.to_string());
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn humanized_text(&self) -> Option<&str> {
        self.humanized_text.as_deref()
    }

    pub fn reanalysis(&self) -> Option<&AnalysisResult> {
        self.reanalysis.as_ref()
    }

    pub fn custom_styles(&self) -> &CustomStyles {
        &self.custom_styles
    }

    /// A new analysis is starting: results derived from the previous input are stale.
    pub fn begin_analysis(&mut self) {
        self.humanized_text = None;
        self.reanalysis = None;
    }

    /// Replaces the analysis wholesale; `None` records a failed attempt.
    pub fn set_analysis(&mut self, result: Option<AnalysisResult>) {
        self.analysis = result;
    }

    /// A new rewrite is starting: the previous re-analysis no longer applies.
    pub fn begin_humanize(&mut self) {
        self.reanalysis = None;
    }

    pub fn set_humanized(&mut self, text: String) {
        self.humanized_text = Some(text);
    }

    pub fn set_reanalysis(&mut self, result: AnalysisResult) {
        self.reanalysis = Some(result);
    }

    /// Returns `true` if a style with this name already existed and was overwritten.
    pub fn save_custom_style(&mut self, name: &str, example: &str) -> bool {
        self.custom_styles.save(name, example)
    }
}
