//! Key classification against comparison platforms
//!
//! Every key bound on the reference platform gets exactly one
//! [`Classification`]. Checks run in a fixed priority order and the first
//! one that fails wins:
//!
//! 1. ignored keys
//! 2. missing on comparison platform 1, 2, ...
//! 3. different from comparison platform 1, 2, ...
//!
//! Later platforms are not consulted once a divergence is found, so a key
//! that differs on several platforms is reported once.

use std::fmt;

use crate::binding::BindingTable;
use crate::ignore::IgnorePredicate;
use crate::platform::{Platform, PlatformTable};

/// Disposition of one reference key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Excluded by the ignore rules
    Ignored,
    /// Not bound at all on this platform
    Missing(Platform),
    /// Bound on this platform, with a different binding list
    Different(Platform),
    /// Same binding list on every comparison platform
    Identical,
}

impl Classification {
    /// Whether the key's reference bindings belong in the override set
    #[inline]
    pub fn needs_override(&self) -> bool {
        matches!(self, Classification::Missing(_) | Classification::Different(_))
    }

    /// The comparison platform responsible for the divergence, if any
    pub fn platform(&self) -> Option<&Platform> {
        match self {
            Classification::Missing(p) | Classification::Different(p) => Some(p),
            Classification::Ignored | Classification::Identical => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Ignored => write!(f, "ignored"),
            Classification::Missing(p) => write!(f, "missing on {}", p),
            Classification::Different(p) => write!(f, "different on {}", p),
            Classification::Identical => write!(f, "identical"),
        }
    }
}

/// A reference key and how it classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOutcome {
    pub key: String,
    pub classification: Classification,
}

/// Classify a single reference key.
///
/// Returns `None` when `key` is not bound on the reference platform; such
/// keys are outside the comparison.
pub fn classify_key(
    key: &str,
    reference: &BindingTable,
    comparisons: &[PlatformTable],
    ignore: &impl IgnorePredicate,
) -> Option<Classification> {
    let bindings = reference.get(key)?;

    if ignore.is_ignored(key) {
        return Some(Classification::Ignored);
    }

    if let Some(target) = comparisons.iter().find(|t| !t.table.contains_key(key)) {
        return Some(Classification::Missing(target.platform.clone()));
    }

    if let Some(target) = comparisons
        .iter()
        .find(|t| t.table.get(key).is_some_and(|other| other != bindings))
    {
        return Some(Classification::Different(target.platform.clone()));
    }

    Some(Classification::Identical)
}

/// Classify every key of `reference`, in sorted key order.
pub fn classify(
    reference: &BindingTable,
    comparisons: &[PlatformTable],
    ignore: &impl IgnorePredicate,
) -> Vec<KeyOutcome> {
    let mut outcomes = Vec::with_capacity(reference.len());

    for key in reference.keys() {
        // Reference keys always classify; the key comes from the table itself.
        let Some(classification) = classify_key(key, reference, comparisons, ignore) else {
            continue;
        };
        tracing::trace!(key, %classification, "classified key");
        outcomes.push(KeyOutcome {
            key: key.to_string(),
            classification,
        });
    }

    outcomes
}
