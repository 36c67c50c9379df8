//! Humanizing styles: the predefined tone list plus user-defined styles by example.

use serde::{Deserialize, Serialize};

/// Styles offered in the selector before any custom style is saved.
pub const PREDEFINED_STYLES: &[&str] = &[
    "Conversational & Casual",
    "Respectful & Formal",
    "Persuasive & Confident",
    "Storytelling & Engaging",
    "Academic & Scholarly",
    "Explanatory & Simple",
    "Humorous & Witty",
];

/// Style used when the form submits none.
pub fn default_style() -> &'static str {
    PREDEFINED_STYLES[0]
}

/// A user-defined style: a name and a sample of the voice to imitate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomStyle {
    pub name: String,
    pub example: String,
}

/// Custom styles keyed by name, in the order they were first saved.
///
/// Names are unique. Saving an existing name replaces its example in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomStyles(Vec<CustomStyle>);

impl CustomStyles {
    /// Inserts or overwrites. Returns `true` if an existing style was replaced.
    pub fn save(&mut self, name: &str, example: &str) -> bool {
        match self.0.iter_mut().find(|s| s.name == name) {
            Some(existing) => {
                existing.example = example.to_string();
                true
            }
            None => {
                self.0.push(CustomStyle {
                    name: name.to_string(),
                    example: example.to_string(),
                });
                false
            }
        }
    }

    pub fn example_for(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.example.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Whether `name` is one of the selector options.
pub fn is_available(custom: &CustomStyles, name: &str) -> bool {
    PREDEFINED_STYLES.contains(&name) || custom.example_for(name).is_some()
}

/// Selector options: predefined styles, then custom names not already listed.
pub fn available_styles(custom: &CustomStyles) -> Vec<String> {
    let mut options: Vec<String> = PREDEFINED_STYLES.iter().map(|s| s.to_string()).collect();
    for name in custom.names() {
        if !options.iter().any(|o| o == name) {
            options.push(name.to_string());
        }
    }
    options
}
