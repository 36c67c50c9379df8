//! Display formatting for analysis results: score labels and tones.

use serde::Serialize;

/// Above this the text is labelled as sounding human.
pub const HUMAN_THRESHOLD: i64 = 70;
/// Above this (and up to `HUMAN_THRESHOLD`) the signals are mixed.
pub const MIXED_THRESHOLD: i64 = 40;

pub const NO_IMPROVEMENTS_MESSAGE: &str = "Looks great! No specific improvement points identified.";

/// Colour hint for the delta label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaTone {
    Positive,
    Neutral,
    Negative,
}

/// Score rendered as a percentage, e.g. `82%`.
pub fn score_label(score: i64) -> String {
    format!("{score}%")
}

/// Returns the delta label and its tone for a human-likeness score.
pub fn delta_label(score: i64) -> (&'static str, DeltaTone) {
    if score > HUMAN_THRESHOLD {
        ("Sounds Human", DeltaTone::Positive)
    } else if score > MIXED_THRESHOLD {
        ("Mixed Signals", DeltaTone::Neutral)
    } else {
        ("Likely AI-Generated", DeltaTone::Negative)
    }
}

/// "+24 points vs. original", "-3 points vs. original", "No change vs. original".
pub fn score_change_label(original: i64, revised: i64) -> String {
    match revised - original {
        0 => "No change vs. original".to_string(),
        1 => "+1 point vs. original".to_string(),
        -1 => "-1 point vs. original".to_string(),
        d if d > 0 => format!("+{d} points vs. original"),
        d => format!("{d} points vs. original"),
    }
}
