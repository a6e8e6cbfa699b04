//! Binding data model
//!
//! A binding is kept as a loosely-typed JSON object so fields beyond
//! `key`/`command`/`when` survive load, diffing and override emission.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{fragment, KeydiffError, Result};

/// One rule mapping a key combination to a command.
///
/// Always holds a string `key` field (checked in [`Binding::from_value`]).
/// Equality is structural: same fields with equal values, regardless of
/// field order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Binding(Map<String, Value>);

impl Binding {
    /// Validate a JSON value as a binding
    pub fn from_value(value: Value) -> Result<Self> {
        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(KeydiffError::BindingNotObject {
                    value: fragment(&other),
                })
            }
        };

        match fields.get("key") {
            None => Err(KeydiffError::MissingKey {
                value: fragment(&Value::Object(fields)),
            }),
            Some(Value::String(_)) => Ok(Self(fields)),
            Some(_) => Err(KeydiffError::KeyNotString {
                value: fragment(&Value::Object(fields)),
            }),
        }
    }

    /// The keyboard key this binding applies to
    pub fn key(&self) -> &str {
        self.0.get("key").and_then(Value::as_str).unwrap_or_default()
    }

    pub fn command(&self) -> Option<&str> {
        self.0.get("command").and_then(Value::as_str)
    }

    /// The `when` context predicate, kept opaque
    pub fn when(&self) -> Option<&str> {
        self.0.get("when").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Ordered bindings for one key; order encodes precedence.
pub type BindingList = Vec<Binding>;

/// All bindings of one platform, grouped by key
///
/// Iteration is in lexicographic key order, so anything driven by a table
/// is reproducible across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingTable {
    groups: BTreeMap<String, BindingList>,
    binding_count: usize,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group a flat sequence of bindings by key, keeping the order in which
    /// bindings for the same key were seen.
    pub fn from_bindings(bindings: impl IntoIterator<Item = Binding>) -> Self {
        let mut table = Self::new();
        for binding in bindings {
            table.push(binding);
        }
        table
    }

    pub fn push(&mut self, binding: Binding) {
        self.groups
            .entry(binding.key().to_string())
            .or_default()
            .push(binding);
        self.binding_count += 1;
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&[Binding]> {
        self.groups.get(key).map(|list| list.as_slice())
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    /// Keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Binding])> {
        self.groups
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    /// Number of distinct bound keys
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of bindings across all keys
    pub fn binding_count(&self) -> usize {
        self.binding_count
    }
}

impl FromIterator<Binding> for BindingTable {
    fn from_iter<I: IntoIterator<Item = Binding>>(iter: I) -> Self {
        Self::from_bindings(iter)
    }
}

#[cfg(test)]
pub(crate) fn binding(value: Value) -> Binding {
    Binding::from_value(value).unwrap()
}
