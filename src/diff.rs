//! Line diff between the original and the edited file text
//!
//! Produces a unified diff (linear-space Myers shortest edit script, three
//! lines of context) as typed lines for display. The output is never parsed
//! back.

use serde::Serialize;
use std::fmt;
use std::ops::{Index, IndexMut, Range};

/// Unchanged lines shown around each change
pub const CONTEXT_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLineKind {
    /// `---` / `+++` file names
    FileHeader,
    /// `@@ -a,b +c,d @@`
    Hunk,
    Context,
    Added,
    Removed,
}

/// One rendered line of a unified diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    pub kind: DiffLineKind,
    /// Full line including its prefix character
    pub text: String,
}

impl DiffLine {
    fn new(kind: DiffLineKind, text: String) -> Self {
        DiffLine { kind, text }
    }
}

impl fmt::Display for DiffLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    Equal,
    Delete,
    Insert,
}

/// Furthest-reaching x per diagonal `k = x - y`
struct Frontier {
    offset: isize,
    v: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Frontier {
            offset: max_d as isize,
            v: vec![0; 2 * max_d + 1],
        }
    }
}

impl Index<isize> for Frontier {
    type Output = usize;

    fn index(&self, k: isize) -> &usize {
        &self.v[(k + self.offset) as usize]
    }
}

impl IndexMut<isize> for Frontier {
    fn index_mut(&mut self, k: isize) -> &mut usize {
        &mut self.v[(k + self.offset) as usize]
    }
}

fn common_prefix(a: &[&str], b: &[&str]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[&str], b: &[&str]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}

/// Linear-space Myers: the middle snake splits the problem in two halves
/// of roughly equal edit distance, so only two frontiers are ever held
struct Search<'a> {
    a: &'a [&'a str],
    b: &'a [&'a str],
    forward: Frontier,
    backward: Frontier,
    edits: Vec<Edit>,
}

impl<'a> Search<'a> {
    fn push(&mut self, edit: Edit, count: usize) {
        self.edits.extend(std::iter::repeat(edit).take(count));
    }

    /// Start of a snake on some optimal path through `a` x `b`
    fn middle_snake(&mut self, a: Range<usize>, b: Range<usize>) -> Option<(usize, usize)> {
        let (sa, sb) = (self.a, self.b);
        let n = a.len();
        let m = b.len();
        let delta = n as isize - m as isize;
        let odd = delta & 1 == 1;
        let d_max = ((n + m + 1) / 2 + 1) as isize;

        self.forward[1] = 0;
        self.backward[1] = 0;
        for d in 0..d_max {
            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.forward[k - 1] < self.forward[k + 1]) {
                    self.forward[k + 1]
                } else {
                    self.forward[k - 1] + 1
                };
                let y = (x as isize - k) as usize;
                let (x0, y0) = (x, y);
                if x < n && y < m {
                    x += common_prefix(&sa[a.start + x..a.end], &sb[b.start + y..b.end]);
                }
                self.forward[k] = x;
                if odd
                    && (k - delta).abs() <= d - 1
                    && self.forward[k] + self.backward[-(k - delta)] >= n
                {
                    return Some((a.start + x0, b.start + y0));
                }
            }

            for k in (-d..=d).rev().step_by(2) {
                let mut x = if k == -d || (k != d && self.backward[k - 1] < self.backward[k + 1]) {
                    self.backward[k + 1]
                } else {
                    self.backward[k - 1] + 1
                };
                let mut y = (x as isize - k) as usize;
                if x < n && y < m {
                    let run = common_suffix(
                        &sa[a.start..a.start + n - x],
                        &sb[b.start..b.start + m - y],
                    );
                    x += run;
                    y += run;
                }
                self.backward[k] = x;
                if !odd
                    && x <= n
                    && y <= m
                    && (k - delta).abs() <= d
                    && self.backward[k] + self.forward[-(k - delta)] >= n
                {
                    return Some((a.start + n - x, b.start + m - y));
                }
            }
        }
        None
    }

    fn conquer(&mut self, mut a: Range<usize>, mut b: Range<usize>) {
        let prefix = common_prefix(&self.a[a.clone()], &self.b[b.clone()]);
        self.push(Edit::Equal, prefix);
        a.start += prefix;
        b.start += prefix;
        let suffix = common_suffix(&self.a[a.clone()], &self.b[b.clone()]);
        a.end -= suffix;
        b.end -= suffix;

        if a.is_empty() || b.is_empty() {
            self.push(Edit::Delete, a.len());
            self.push(Edit::Insert, b.len());
        } else {
            match self.middle_snake(a.clone(), b.clone()) {
                // the split must leave work on both sides
                Some((x, y))
                    if (a.start..=a.end).contains(&x)
                        && (b.start..=b.end).contains(&y)
                        && (x, y) != (a.start, b.start)
                        && (x, y) != (a.end, b.end) =>
                {
                    self.conquer(a.start..x, b.start..y);
                    self.conquer(x..a.end, y..b.end);
                }
                _ => {
                    self.push(Edit::Delete, a.len());
                    self.push(Edit::Insert, b.len());
                }
            }
        }
        self.push(Edit::Equal, suffix);
    }
}

/// Shortest edit script from `a` to `b`, in space linear in the input
fn shortest_edit(a: &[&str], b: &[&str]) -> Vec<Edit> {
    let max_d = (a.len() + b.len() + 1) / 2 + 1;
    let mut search = Search {
        a,
        b,
        forward: Frontier::new(max_d),
        backward: Frontier::new(max_d),
        edits: Vec::with_capacity(a.len() + b.len()),
    };
    search.conquer(0..a.len(), 0..b.len());

    let mut edits = search.edits;
    // removals before additions within each changed run
    for run in edits.split_mut(|e| *e == Edit::Equal) {
        run.sort_by_key(|e| *e != Edit::Delete);
    }
    edits
}

/// `start,len` in the 1-based convention of unified diffs
fn format_range(start: usize, len: usize) -> String {
    match len {
        1 => format!("{}", start + 1),
        0 => format!("{},0", start),
        _ => format!("{},{}", start + 1, len),
    }
}

/// Unified diff of two texts. Identical texts give an empty list.
pub fn diff(original: &str, new: &str, original_name: &str, new_name: &str) -> Vec<DiffLine> {
    let a: Vec<&str> = original.lines().collect();
    let b: Vec<&str> = new.lines().collect();
    if a == b {
        return Vec::new();
    }

    let edits = shortest_edit(&a, &b);

    // line positions in `a` and `b` before each edit
    let mut positions = Vec::with_capacity(edits.len() + 1);
    let (mut i, mut j) = (0usize, 0usize);
    for edit in &edits {
        positions.push((i, j));
        match edit {
            Edit::Equal => {
                i += 1;
                j += 1;
            }
            Edit::Delete => i += 1,
            Edit::Insert => j += 1,
        }
    }
    positions.push((i, j));

    let changes: Vec<usize> = edits
        .iter()
        .enumerate()
        .filter(|(_, e)| **e != Edit::Equal)
        .map(|(idx, _)| idx)
        .collect();

    // group changes whose separating run of equal lines fits in the context
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for &idx in &changes {
        match groups.last_mut() {
            Some((_, last)) if idx - *last - 1 <= 2 * CONTEXT_LINES => *last = idx,
            _ => groups.push((idx, idx)),
        }
    }

    let mut out = vec![
        DiffLine::new(DiffLineKind::FileHeader, format!("--- {}", original_name)),
        DiffLine::new(DiffLineKind::FileHeader, format!("+++ {}", new_name)),
    ];
    for (first, last) in groups {
        let start = first.saturating_sub(CONTEXT_LINES);
        let end = (last + CONTEXT_LINES + 1).min(edits.len());
        let (a_start, b_start) = positions[start];
        let (a_end, b_end) = positions[end];
        out.push(DiffLine::new(
            DiffLineKind::Hunk,
            format!(
                "@@ -{} +{} @@",
                format_range(a_start, a_end - a_start),
                format_range(b_start, b_end - b_start)
            ),
        ));
        for idx in start..end {
            let (ai, bi) = positions[idx];
            let line = match edits[idx] {
                Edit::Equal => DiffLine::new(DiffLineKind::Context, format!(" {}", a[ai])),
                Edit::Delete => DiffLine::new(DiffLineKind::Removed, format!("-{}", a[ai])),
                Edit::Insert => DiffLine::new(DiffLineKind::Added, format!("+{}", b[bi])),
            };
            out.push(line);
        }
    }
    out
}
