//! Keybindings file loader
//!
//! Keybindings files are JSON with whole-line `//` comments. Comments that
//! share a line with data are not handled, which matches how editors write
//! their default keybindings dumps.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::binding::{Binding, BindingTable};
use crate::error::{fragment, KeydiffError, Result};
use crate::platform::Platform;

/// File name suffix for per-platform keybindings dumps
pub const KEYBINDINGS_SUFFIX: &str = ".keybindings.json";

/// Drop every line whose trimmed content starts with `//`.
///
/// Kept lines retain their line terminators.
pub fn strip_line_comments(text: &str) -> String {
    text.split_inclusive('\n')
        .filter(|line| !line.trim().starts_with("//"))
        .collect()
}

/// Parse comment-stripped keybindings text into a table.
///
/// `source_name` is only used in error messages.
pub fn parse_bindings(text: &str, source_name: &str) -> Result<BindingTable> {
    let stripped = strip_line_comments(text);
    let value: Value =
        serde_json::from_str(&stripped).map_err(|source| KeydiffError::JsonParse {
            source_name: source_name.to_string(),
            source,
        })?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(KeydiffError::NotAList {
                source_name: source_name.to_string(),
                value: fragment(&other),
            })
        }
    };

    let mut table = BindingTable::new();
    for item in items {
        table.push(Binding::from_value(item)?);
    }
    Ok(table)
}

/// Read a keybindings file from disk
pub fn read_bindings(path: &Path) -> Result<BindingTable> {
    let text = fs::read_to_string(path).map_err(|source| KeydiffError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_bindings(&text, &path.display().to_string())?;

    tracing::debug!(
        path = %path.display(),
        keys = table.len(),
        bindings = table.binding_count(),
        "loaded keybindings"
    );
    Ok(table)
}

/// Path of the default keybindings dump for `platform` inside `dir`
pub fn platform_path(dir: &Path, platform: &Platform) -> PathBuf {
    dir.join(format!("{}{}", platform.id(), KEYBINDINGS_SUFFIX))
}

/// Read `<dir>/<platform>.keybindings.json`
pub fn read_platform_bindings(dir: &Path, platform: &Platform) -> Result<BindingTable> {
    read_bindings(&platform_path(dir, platform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strip_line_comments() {
        let text = "// header\n[\n    // indented comment\n  {\"key\": \"a\"}\n]\n";
        assert_eq!(strip_line_comments(text), "[\n  {\"key\": \"a\"}\n]\n");
    }

    #[test]
    fn test_strip_keeps_trailing_line_without_newline() {
        assert_eq!(strip_line_comments("[]"), "[]");
        assert_eq!(strip_line_comments("[]\n// end"), "[]\n");
    }

    #[test]
    fn test_strip_keeps_urls_inside_strings() {
        let text = "[{\"key\": \"a\", \"args\": \"http://x\"}]";
        assert_eq!(strip_line_comments(text), text);
    }

    #[test]
    fn test_parse_commented_bindings() {
        let text = r#"// Default keybindings
[
    // Editor
    { "key": "ctrl+z", "command": "undo", "when": "textInputFocus" },
    { "key": "ctrl+y", "command": "redo" },
    { "key": "ctrl+z", "command": "notebook.undo" }
]"#;
        let table = parse_bindings(text, "windows.keybindings.json").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.binding_count(), 3);
        assert_eq!(table.get("ctrl+z").unwrap().len(), 2);
        assert_eq!(table.get("ctrl+z").unwrap()[1].command(), Some("notebook.undo"));
    }

    #[test]
    fn test_parse_rejects_top_level_object() {
        let err = parse_bindings(r#"{"key": "a"}"#, "x.json").unwrap_err();
        match err {
            KeydiffError::NotAList { source_name, value } => {
                assert_eq!(source_name, "x.json");
                assert!(value.contains("\"key\""));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_object_element() {
        let err = parse_bindings(r#"[{"key": "a"}, "b"]"#, "x.json").unwrap_err();
        assert!(matches!(err, KeydiffError::BindingNotObject { ref value } if value == "\"b\""));
    }

    #[test]
    fn test_parse_rejects_missing_key() {
        let err = parse_bindings(r#"[{"command": "undo"}]"#, "x.json").unwrap_err();
        assert!(matches!(err, KeydiffError::MissingKey { .. }));
    }

    #[test]
    fn test_parse_reports_invalid_json() {
        let err = parse_bindings("[{\"key\": \"a\"} // trailing\n]", "x.json").unwrap_err();
        assert!(matches!(err, KeydiffError::JsonParse { .. }));
    }

    #[test]
    fn test_read_platform_bindings() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("linux.keybindings.json"),
            "[{\"key\": \"f1\", \"command\": \"help\"}]",
        )
        .unwrap();

        let linux = Platform::new("linux");
        let table = read_platform_bindings(dir.path(), &linux).unwrap();
        assert!(table.contains_key("f1"));

        let err = read_platform_bindings(dir.path(), &Platform::new("macos")).unwrap_err();
        match err {
            KeydiffError::Io { path, .. } => {
                assert!(path.ends_with("macos.keybindings.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
