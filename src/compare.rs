//! One comparison run: reference platform against comparison platforms

use std::collections::HashSet;

use crate::classify::{classify, Classification, KeyOutcome};
use crate::error::{KeydiffError, Result};
use crate::ignore::IgnorePredicate;
use crate::overrides::{accumulate, OverrideSet};
use crate::platform::PlatformTable;

/// Classified outcome of comparing a reference platform to others
#[derive(Debug, Clone)]
pub struct Comparison {
    reference: PlatformTable,
    comparisons: Vec<PlatformTable>,
    outcomes: Vec<KeyOutcome>,
    overrides: OverrideSet,
}

impl Comparison {
    /// Classify every reference key and collect the overrides.
    ///
    /// `comparisons` is in priority order.
    pub fn run(
        reference: PlatformTable,
        comparisons: Vec<PlatformTable>,
        ignore: &impl IgnorePredicate,
    ) -> Result<Self> {
        if comparisons.is_empty() {
            return Err(KeydiffError::NoComparisonPlatforms {
                reference: reference.platform.id().to_string(),
            });
        }

        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(reference.platform.id());
        for target in &comparisons {
            if !seen.insert(target.platform.id()) {
                return Err(KeydiffError::DuplicatePlatform {
                    platform: target.platform.id().to_string(),
                });
            }
        }

        let outcomes = classify(&reference.table, &comparisons, ignore);
        let overrides = accumulate(&outcomes, &reference.table);

        tracing::debug!(
            reference = reference.platform.id(),
            keys = outcomes.len(),
            overrides = overrides.len(),
            "comparison complete"
        );

        Ok(Self {
            reference,
            comparisons,
            outcomes,
            overrides,
        })
    }

    pub fn reference(&self) -> &PlatformTable {
        &self.reference
    }

    /// Comparison platforms in priority order
    pub fn comparisons(&self) -> &[PlatformTable] {
        &self.comparisons
    }

    /// Reference platform first, then comparison platforms
    pub fn platforms(&self) -> impl Iterator<Item = &PlatformTable> {
        std::iter::once(&self.reference).chain(self.comparisons.iter())
    }

    /// One outcome per reference key, in sorted key order
    pub fn outcomes(&self) -> &[KeyOutcome] {
        &self.outcomes
    }

    pub fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    pub fn classification_of(&self, key: &str) -> Option<&Classification> {
        self.outcomes
            .binary_search_by(|o| o.key.as_str().cmp(key))
            .ok()
            .map(|idx| &self.outcomes[idx].classification)
    }

    /// Keys with exactly this classification, in sorted order
    pub fn keys_with(&self, classification: &Classification) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| &o.classification == classification)
            .map(|o| o.key.as_str())
            .collect()
    }

    pub fn count(&self, classification: &Classification) -> usize {
        self.outcomes
            .iter()
            .filter(|o| &o.classification == classification)
            .count()
    }

    /// All categories in report order: ignored, missing per platform,
    /// different per platform, identical.
    pub fn categories(&self) -> Vec<Classification> {
        let targets = || self.comparisons.iter().map(|t| t.platform.clone());
        std::iter::once(Classification::Ignored)
            .chain(targets().map(Classification::Missing))
            .chain(targets().map(Classification::Different))
            .chain(std::iter::once(Classification::Identical))
            .collect()
    }
}
