//! Error types with fix suggestions
//!
//! Error code ranges:
//! - KEYDIFF-001-009: Input file errors
//! - KEYDIFF-010-019: Binding structure errors
//! - KEYDIFF-020-029: Configuration errors
//! - KEYDIFF-030-039: Output errors

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KeydiffError>;

/// Trait for errors that provide fix suggestions
pub trait FixSuggestion {
    fn fix_suggestion(&self) -> Option<&str>;
}

/// Longest fragment of an offending JSON value shown in a message.
const FRAGMENT_LIMIT: usize = 120;

/// Compact one-line rendering of an offending value for error messages.
pub fn fragment(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() <= FRAGMENT_LIMIT {
        return text;
    }
    let cut: String = text.chars().take(FRAGMENT_LIMIT).collect();
    format!("{cut}...")
}

#[derive(Error, Debug)]
pub enum KeydiffError {
    // ─────────────────────────────────────────────────────────────
    // Input file errors (KEYDIFF-001 to KEYDIFF-009)
    // ─────────────────────────────────────────────────────────────
    #[error("[KEYDIFF-001] Cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[KEYDIFF-002] Invalid JSON in '{source_name}': {source}")]
    JsonParse {
        source_name: String,
        #[source]
        source: serde_json::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // Binding structure errors (KEYDIFF-010 to KEYDIFF-019)
    // ─────────────────────────────────────────────────────────────
    #[error("[KEYDIFF-010] Expected key bindings in '{source_name}' to be a list, got: {value}")]
    NotAList { source_name: String, value: String },

    #[error("[KEYDIFF-011] Expected binding to be an object: {value}")]
    BindingNotObject { value: String },

    #[error("[KEYDIFF-012] Expected binding to have a 'key': {value}")]
    MissingKey { value: String },

    #[error("[KEYDIFF-013] Expected binding 'key' to be a string: {value}")]
    KeyNotString { value: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration errors (KEYDIFF-020 to KEYDIFF-029)
    // ─────────────────────────────────────────────────────────────
    #[error("[KEYDIFF-020] Configuration error: {reason}")]
    ConfigError { reason: String },

    #[error("[KEYDIFF-021] No comparison platforms given for reference '{reference}'")]
    NoComparisonPlatforms { reference: String },

    #[error("[KEYDIFF-022] Platform '{platform}' is listed more than once")]
    DuplicatePlatform { platform: String },

    // ─────────────────────────────────────────────────────────────
    // Output errors (KEYDIFF-030 to KEYDIFF-039)
    // ─────────────────────────────────────────────────────────────
    #[error("[KEYDIFF-030] Cannot write '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KeydiffError {
    /// Short error code, e.g. `KEYDIFF-012`
    pub fn code(&self) -> &'static str {
        match self {
            KeydiffError::Io { .. } => "KEYDIFF-001",
            KeydiffError::JsonParse { .. } => "KEYDIFF-002",
            KeydiffError::NotAList { .. } => "KEYDIFF-010",
            KeydiffError::BindingNotObject { .. } => "KEYDIFF-011",
            KeydiffError::MissingKey { .. } => "KEYDIFF-012",
            KeydiffError::KeyNotString { .. } => "KEYDIFF-013",
            KeydiffError::ConfigError { .. } => "KEYDIFF-020",
            KeydiffError::NoComparisonPlatforms { .. } => "KEYDIFF-021",
            KeydiffError::DuplicatePlatform { .. } => "KEYDIFF-022",
            KeydiffError::OutputWrite { .. } => "KEYDIFF-030",
        }
    }
}

impl FixSuggestion for KeydiffError {
    fn fix_suggestion(&self) -> Option<&str> {
        match self {
            KeydiffError::Io { .. } => Some("Check --dir and the platform ids (<dir>/<id>.keybindings.json)"),
            KeydiffError::JsonParse { .. } => {
                Some("Only whole-line // comments are stripped; remove trailing comments and commas")
            }
            KeydiffError::NotAList { .. } => Some("A keybindings file must be a JSON array of objects"),
            KeydiffError::BindingNotObject { .. } => Some("Each array element must be an object"),
            KeydiffError::MissingKey { .. } | KeydiffError::KeyNotString { .. } => {
                Some("Every binding needs a string \"key\" field")
            }
            KeydiffError::ConfigError { .. } => Some("Check keydiff.yaml and KEYDIFF_DEBUG"),
            KeydiffError::NoComparisonPlatforms { .. } => Some("Pass at least one --compare platform"),
            KeydiffError::DuplicatePlatform { .. } => {
                Some("List each platform once and keep the reference out of --compare")
            }
            KeydiffError::OutputWrite { .. } => Some("Check the --output path and permissions"),
        }
    }
}
