//! Unified diff of two binding lists, for display
//!
//! Both lists are rendered as pretty JSON (2-space indent, fields in load
//! order) and compared line by line. Output is unified-diff hunks with 3
//! lines of context and no `---`/`+++` file header.
//!
//! Classification never looks at this output; it compares lists
//! structurally.

use std::collections::VecDeque;

use serde_json::Value;

use crate::binding::Binding;

/// Lines of unchanged context around each change
pub const CONTEXT_LINES: usize = 3;

/// Pretty JSON of a binding list, 2 spaces per nesting level
pub fn canonical_json(bindings: &[Binding]) -> String {
    let value = Value::Array(
        bindings
            .iter()
            .map(|b| Value::Object(b.fields().clone()))
            .collect(),
    );
    format!("{:#}", value)
}

/// Render the differences between `left` and `right`.
///
/// Returns an empty iterator when both render to the same text.
pub fn render_diff(left: &[Binding], right: &[Binding]) -> DiffLines {
    let left_json = canonical_json(left);
    let right_json = canonical_json(right);
    diff_lines(&left_json, &right_json)
}

/// Line diff of two arbitrary texts, same format as [`render_diff`]
pub fn diff_lines(left: &str, right: &str) -> DiffLines {
    let a: Vec<String> = left.lines().map(str::to_string).collect();
    let b: Vec<String> = right.lines().map(str::to_string).collect();
    let groups = group_opcodes(opcodes(&a, &b), CONTEXT_LINES);
    DiffLines {
        a,
        b,
        groups: groups.into(),
        pending: VecDeque::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// `a[i1..i2]` relates to `b[j1..j2]` as described by `tag`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Opcode {
    tag: Tag,
    i1: usize,
    i2: usize,
    j1: usize,
    j2: usize,
}

/// Edit script from a longest-common-subsequence alignment.
///
/// Adjacent deletions and insertions between two matched lines collapse
/// into a single `Replace`.
fn opcodes(a: &[String], b: &[String]) -> Vec<Opcode> {
    let (n, m) = (a.len(), b.len());

    // lcs[i][j] = LCS length of a[i..] and b[j..]
    let mut lcs = vec![vec![0u32; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if a[i] == b[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut codes = Vec::new();
    let (mut i, mut j) = (0, 0);
    let (mut start_i, mut start_j) = (0, 0);

    let flush_change = |codes: &mut Vec<Opcode>, i1: usize, i2: usize, j1: usize, j2: usize| {
        let tag = match (i1 < i2, j1 < j2) {
            (true, true) => Tag::Replace,
            (true, false) => Tag::Delete,
            (false, true) => Tag::Insert,
            (false, false) => return,
        };
        codes.push(Opcode { tag, i1, i2, j1, j2 });
    };

    while i < n || j < m {
        if i < n && j < m && a[i] == b[j] {
            flush_change(&mut codes, start_i, i, start_j, j);
            let (eq_i, eq_j) = (i, j);
            while i < n && j < m && a[i] == b[j] {
                i += 1;
                j += 1;
            }
            codes.push(Opcode {
                tag: Tag::Equal,
                i1: eq_i,
                i2: i,
                j1: eq_j,
                j2: j,
            });
            start_i = i;
            start_j = j;
        } else if j >= m || (i < n && lcs[i + 1][j] >= lcs[i][j + 1]) {
            i += 1;
        } else {
            j += 1;
        }
    }
    flush_change(&mut codes, start_i, i, start_j, j);

    codes
}

/// Split an edit script into hunks with `context` lines around changes.
fn group_opcodes(mut codes: Vec<Opcode>, context: usize) -> Vec<Vec<Opcode>> {
    if codes.is_empty() {
        return Vec::new();
    }

    if let Some(first) = codes.first_mut().filter(|c| c.tag == Tag::Equal) {
        first.i1 = first.i1.max(first.i2.saturating_sub(context));
        first.j1 = first.j1.max(first.j2.saturating_sub(context));
    }
    if let Some(last) = codes.last_mut().filter(|c| c.tag == Tag::Equal) {
        last.i2 = last.i2.min(last.i1 + context);
        last.j2 = last.j2.min(last.j1 + context);
    }

    let mut groups = Vec::new();
    let mut group = Vec::new();
    for mut code in codes {
        if code.tag == Tag::Equal && code.i2 - code.i1 > 2 * context {
            group.push(Opcode {
                i2: code.i2.min(code.i1 + context),
                j2: code.j2.min(code.j1 + context),
                ..code
            });
            groups.push(std::mem::take(&mut group));
            code.i1 = code.i1.max(code.i2 - context);
            code.j1 = code.j1.max(code.j2 - context);
        }
        group.push(code);
    }
    groups.push(group);

    // Hunks made of unchanged lines only carry no information
    groups.retain(|g| g.iter().any(|c| c.tag != Tag::Equal));
    groups
}

/// `start,length` in unified-diff notation (1-based)
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    match length {
        0 => format!("{},0", start),
        1 => format!("{}", start + 1),
        _ => format!("{},{}", start + 1, length),
    }
}

/// Lazily rendered diff lines.
///
/// Hunks are computed up front; their text is produced on demand. The
/// iterator is consumed as it goes and cannot be restarted.
#[derive(Debug)]
pub struct DiffLines {
    a: Vec<String>,
    b: Vec<String>,
    groups: VecDeque<Vec<Opcode>>,
    pending: VecDeque<String>,
}

impl DiffLines {
    /// Number of hunks not yet rendered
    pub fn remaining_hunks(&self) -> usize {
        self.groups.len()
    }

    fn render_hunk(&mut self, group: &[Opcode]) {
        let (Some(first), Some(last)) = (group.first(), group.last()) else {
            return;
        };
        self.pending.push_back(format!(
            "@@ -{} +{} @@",
            format_range(first.i1, last.i2),
            format_range(first.j1, last.j2)
        ));

        for code in group {
            match code.tag {
                Tag::Equal => {
                    for line in &self.a[code.i1..code.i2] {
                        self.pending.push_back(format!(" {}", line));
                    }
                }
                Tag::Replace | Tag::Delete | Tag::Insert => {
                    for line in &self.a[code.i1..code.i2] {
                        self.pending.push_back(format!("-{}", line));
                    }
                    for line in &self.b[code.j1..code.j2] {
                        self.pending.push_back(format!("+{}", line));
                    }
                }
            }
        }
    }
}

impl Iterator for DiffLines {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while self.pending.is_empty() {
            let group = self.groups.pop_front()?;
            self.render_hunk(&group);
        }
        self.pending.pop_front()
    }
}
