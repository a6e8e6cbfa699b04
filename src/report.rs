//! Human-readable comparison report
//!
//! Layout:
//! 1. a notice per divergent key (binding dump or diff)
//! 2. per-category counts with the keys in each category
//! 3. bound-key totals per platform

use std::io::{self, Write};

use colored::Colorize;

use crate::classify::Classification;
use crate::compare::Comparison;
use crate::diff::render_diff;
use crate::overrides::indented_json;

/// Indent of binding dumps under a "not bound" notice
const NOTICE_INDENT: usize = 2;

/// Writes a [`Comparison`] as text
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportPrinter {
    color: bool,
}

impl ReportPrinter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Full report: notices, summary, totals
    pub fn write(&self, comparison: &Comparison, out: &mut impl Write) -> io::Result<()> {
        self.write_notices(comparison, out)?;
        self.write_summary(comparison, out)?;
        self.write_totals(comparison, out)
    }

    /// Report as a string (colour as configured)
    pub fn render(&self, comparison: &Comparison) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write(comparison, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    pub fn write_notices(&self, comparison: &Comparison, out: &mut impl Write) -> io::Result<()> {
        let reference = &comparison.reference().platform;

        for outcome in comparison.outcomes() {
            let Some(bindings) = comparison.reference().table.get(&outcome.key) else {
                continue;
            };

            match &outcome.classification {
                Classification::Missing(target) => {
                    let line = format!(
                        "Key '{}' is not bound on {}; on {}, it is:",
                        outcome.key, target, reference
                    );
                    writeln!(out, "{}", self.heading(&line))?;
                    writeln!(out, "{}", indented_json(bindings, NOTICE_INDENT))?;
                }
                Classification::Different(target) => {
                    let line = format!(
                        "Bindings for '{}' differ between {} and {}:",
                        outcome.key, reference, target
                    );
                    writeln!(out, "{}", self.heading(&line))?;

                    let other = comparison
                        .comparisons()
                        .iter()
                        .find(|t| &t.platform == target)
                        .and_then(|t| t.table.get(&outcome.key))
                        .unwrap_or_default();
                    for diff_line in render_diff(bindings, other) {
                        writeln!(out, "{}", self.diff_line(&diff_line))?;
                    }
                }
                Classification::Ignored | Classification::Identical => {}
            }
        }
        Ok(())
    }

    pub fn write_summary(&self, comparison: &Comparison, out: &mut impl Write) -> io::Result<()> {
        let reference = &comparison.reference();
        let line = format!(
            "Of the {} keys bound on {}:",
            reference.table.len(),
            reference.platform
        );
        writeln!(out, "{}", self.heading(&line))?;

        let platform_count = comparison.comparisons().len() + 1;
        for category in comparison.categories() {
            let keys = comparison.keys_with(&category);
            writeln!(out, "  {} {}:", keys.len(), category_label(&category, platform_count))?;
            for key in keys {
                writeln!(out, "    {}", key)?;
            }
        }
        Ok(())
    }

    pub fn write_totals(&self, comparison: &Comparison, out: &mut impl Write) -> io::Result<()> {
        for target in comparison.platforms() {
            writeln!(out, "{} has {} bound keys.", target.platform, target.table.len())?;
        }
        Ok(())
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn diff_line(&self, line: &str) -> String {
        if !self.color {
            return line.to_string();
        }
        if line.starts_with("@@") {
            line.cyan().to_string()
        } else if line.starts_with('-') {
            line.red().to_string()
        } else if line.starts_with('+') {
            line.green().to_string()
        } else {
            line.to_string()
        }
    }
}

/// Summary label for one category
pub fn category_label(category: &Classification, platform_count: usize) -> String {
    match category {
        Classification::Ignored => "are ignored by the ignore rules".to_string(),
        Classification::Missing(p) => format!("are not bound on {}", p),
        Classification::Different(p) => format!("are bound differently on {}", p),
        Classification::Identical => match platform_count {
            2 => "are the same on both platforms".to_string(),
            3 => "are the same on all three platforms".to_string(),
            n => format!("are the same on all {} platforms", n),
        },
    }
}
