//! Platform identity and per-platform binding tables

use std::fmt;
use std::sync::Arc;

use crate::binding::BindingTable;

/// A platform variant of the application, e.g. `windows`.
///
/// The id names the keybindings file; the label is used in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Platform {
    id: Arc<str>,
    label: Arc<str>,
}

impl Platform {
    pub fn new(id: &str) -> Self {
        let id = id.trim().to_lowercase();
        let label = known_label(&id).map(str::to_string).unwrap_or_else(|| capitalize(&id));
        Self {
            id: Arc::from(id),
            label: Arc::from(label),
        }
    }

    /// Platform with an explicit display label
    pub fn with_label(id: &str, label: &str) -> Self {
        Self {
            id: Arc::from(id.trim().to_lowercase()),
            label: Arc::from(label),
        }
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn known_label(id: &str) -> Option<&'static str> {
    match id {
        "windows" | "win" => Some("Windows"),
        "linux" => Some("Linux"),
        "macos" | "mac" | "osx" | "darwin" => Some("MacOS"),
        _ => None,
    }
}

fn capitalize(id: &str) -> String {
    let mut chars = id.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A platform together with its loaded bindings
#[derive(Debug, Clone)]
pub struct PlatformTable {
    pub platform: Platform,
    pub table: BindingTable,
}

impl PlatformTable {
    pub fn new(platform: Platform, table: BindingTable) -> Self {
        Self { platform, table }
    }
}
