//! Keys excluded from comparison
//!
//! Exclusions are exact key matches. An ignored key is never compared,
//! never diffed and never emitted as an override.

use std::collections::BTreeSet;

/// Keys ignored unless `--no-default-ignores` is given.
///
/// - `escape`: the extracted defaults show one anomalous difference that
///   does not reproduce in a live editor; Escape means the same everywhere.
/// - `ctrl+k ctrl+k`: its `when` clause refers to the extractor's own user
///   data directory and can never match elsewhere.
pub const DEFAULT_IGNORED_KEYS: &[&str] = &["escape", "ctrl+k ctrl+k"];

/// Decides whether a key takes part in the comparison
pub trait IgnorePredicate {
    fn is_ignored(&self, key: &str) -> bool;
}

impl<F> IgnorePredicate for F
where
    F: Fn(&str) -> bool,
{
    fn is_ignored(&self, key: &str) -> bool {
        self(key)
    }
}

/// Exact-match set of ignored keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRules {
    keys: BTreeSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::empty().with_keys(DEFAULT_IGNORED_KEYS.iter().copied())
    }
}

impl IgnoreRules {
    /// No exclusions at all
    pub fn empty() -> Self {
        Self {
            keys: BTreeSet::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.keys.insert(key.into());
        self
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl IgnorePredicate for IgnoreRules {
    #[inline]
    fn is_ignored(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}
