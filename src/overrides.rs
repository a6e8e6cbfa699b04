//! Override bindings collected from the reference platform
//!
//! The emitted file is meant to be pasted into the reference platform's
//! own keybinding contributions, so bindings that are absent or different
//! elsewhere can be reapplied there.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::binding::{Binding, BindingTable};
use crate::classify::KeyOutcome;
use crate::error::{fragment, KeydiffError, Result};

/// Indentation the override artifact is written with
pub const OUTPUT_BASE_INDENT: usize = 4;

/// Ordered reference bindings that need overriding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideSet {
    bindings: Vec<Binding>,
}

/// Concatenate, in outcome order, the reference bindings of every key that
/// is neither identical nor ignored.
pub fn accumulate(outcomes: &[KeyOutcome], reference: &BindingTable) -> OverrideSet {
    let mut set = OverrideSet::default();
    for outcome in outcomes
        .iter()
        .filter(|o| o.classification.needs_override())
    {
        if let Some(bindings) = reference.get(&outcome.key) {
            set.extend(bindings);
        }
    }
    set
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, bindings: &[Binding]) {
        self.bindings.extend_from_slice(bindings);
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// JSON with 2-space nesting and `base_indent` spaces before every line.
    ///
    /// The last line has no trailing newline.
    pub fn to_indented_json(&self, base_indent: usize) -> String {
        indented_json(&self.bindings, base_indent)
    }

    /// Persist as the override artifact (base indent 4, trailing newline)
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut content = self.to_indented_json(OUTPUT_BASE_INDENT);
        content.push('\n');
        fs::write(path, content).map_err(|source| KeydiffError::OutputWrite {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(path = %path.display(), bindings = self.len(), "wrote overrides");
        Ok(())
    }

    /// Re-read an emitted override artifact
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).map_err(|source| KeydiffError::JsonParse {
            source_name: "overrides".to_string(),
            source,
        })?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(KeydiffError::NotAList {
                    source_name: "overrides".to_string(),
                    value: fragment(&other),
                })
            }
        };

        let bindings = items
            .into_iter()
            .map(Binding::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bindings })
    }
}

/// Pretty JSON of `bindings`, every line prefixed by `base_indent` spaces
pub fn indented_json(bindings: &[Binding], base_indent: usize) -> String {
    let prefix = " ".repeat(base_indent);
    crate::diff::canonical_json(bindings)
        .lines()
        .map(|line| format!("{}{}", prefix, line))
        .collect::<Vec<_>>()
        .join("\n")
}
