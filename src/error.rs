//! Error types with fix suggestions

use thiserror::Error;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Errors from the fallible helpers (regex presets, CSV parsing).
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("unknown regex preset: '{0}'")]
    UnknownPreset(String),

    #[error("invalid pattern: {0}")]
    BadPattern(#[from] regex::Error),

    #[error("CSV input has no header row")]
    EmptyCsv,
}

impl FixSuggestion for ToolError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            ToolError::UnknownPreset(_) => {
                Some("Use a preset name from patterns::preset (e.g. 'email', 'machine_name')")
            }
            ToolError::BadPattern(_) => Some("Check the regular expression syntax"),
            ToolError::EmptyCsv => Some("Provide at least a header line"),
        }
    }
}
