//! keydiff - compare editor keybindings across platforms

pub mod binding;
pub mod classify;
pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod ignore;
pub mod loader;
pub mod overrides;
pub mod platform;
pub mod report;

pub use binding::{Binding, BindingList, BindingTable};
pub use classify::{classify, Classification, KeyOutcome};
pub use compare::Comparison;
pub use config::Settings;
pub use diff::{render_diff, DiffLines};
pub use error::{FixSuggestion, KeydiffError, Result};
pub use ignore::{IgnorePredicate, IgnoreRules};
pub use overrides::{accumulate, OverrideSet};
pub use platform::{Platform, PlatformTable};
pub use report::ReportPrinter;
