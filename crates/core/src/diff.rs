#![forbid(unsafe_code)]

use serde::Serialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiffLine {
    /// 1-based line number in the snapshot the line belongs to.
    pub line_no: usize,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub added_lines: Vec<DiffLine>,
    pub removed_lines: Vec<DiffLine>,
}

impl LineDiff {
    pub fn is_empty(&self) -> bool {
        self.added_lines.is_empty() && self.removed_lines.is_empty()
    }
}

/// Line-oriented diff from `from` to `to` over a longest common subsequence.
/// Both output lists keep the order of their source text.
///
/// Runs in memory linear in the line count: the subsequence is found by
/// divide and conquer over two rolling rows rather than a full table.
pub fn diff_lines(from: &str, to: &str) -> LineDiff {
    let old: Vec<&str> = from.lines().collect();
    let new: Vec<&str> = to.lines().collect();

    // A line missing from the other side can never be part of the subsequence.
    let in_old: HashSet<&str> = old.iter().copied().collect();
    let in_new: HashSet<&str> = new.iter().copied().collect();
    let old_idx: Vec<usize> = (0..old.len()).filter(|&i| in_new.contains(old[i])).collect();
    let new_idx: Vec<usize> = (0..new.len()).filter(|&j| in_old.contains(new[j])).collect();
    let old_shared: Vec<&str> = old_idx.iter().map(|&i| old[i]).collect();
    let new_shared: Vec<&str> = new_idx.iter().map(|&j| new[j]).collect();

    let mut pairs = Vec::new();
    common_pairs(&old_shared, &new_shared, 0, 0, &mut pairs);

    let mut old_kept = vec![false; old.len()];
    let mut new_kept = vec![false; new.len()];
    for (i, j) in pairs {
        old_kept[old_idx[i]] = true;
        new_kept[new_idx[j]] = true;
    }

    LineDiff {
        added_lines: unmatched(&new, &new_kept),
        removed_lines: unmatched(&old, &old_kept),
    }
}

/// Pushes `(a index, b index)` pairs of one longest common subsequence,
/// offset by `a_off`/`b_off`.
fn common_pairs(
    a: &[&str],
    b: &[&str],
    a_off: usize,
    b_off: usize,
    out: &mut Vec<(usize, usize)>,
) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    out.extend((0..prefix).map(|k| (a_off + k, b_off + k)));
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let (a_off, b_off) = (a_off + prefix, b_off + prefix);

    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);
    out.extend((0..suffix).map(|k| (a_off + a.len() + k, b_off + b.len() + k)));

    if a.is_empty() || b.is_empty() {
        return;
    }
    if a.len() == 1 {
        if let Some(j) = b.iter().position(|line| *line == a[0]) {
            out.push((a_off, b_off + j));
        }
        return;
    }

    let mid = a.len() / 2;
    let head = lcs_row(&a[..mid], b, false);
    let tail = lcs_row(&a[mid..], b, true);
    let split = (0..=b.len())
        .max_by_key(|&j| (head[j] + tail[b.len() - j], std::cmp::Reverse(j)))
        .unwrap_or(0);

    common_pairs(&a[..mid], &b[..split], a_off, b_off, out);
    common_pairs(&a[mid..], &b[split..], a_off + mid, b_off + split, out);
}

/// `row[j]` is the subsequence length of `a` against the first `j` lines of
/// `b`, or against the last `j` lines when `reversed` (with `a` read backwards).
fn lcs_row(a: &[&str], b: &[&str], reversed: bool) -> Vec<usize> {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for i in 0..a.len() {
        let x = pick(a, i, reversed);
        for j in 1..=b.len() {
            cur[j] = if x == pick(b, j - 1, reversed) {
                prev[j - 1] + 1
            } else {
                prev[j].max(cur[j - 1])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev
}

fn pick<'a>(lines: &[&'a str], idx: usize, reversed: bool) -> &'a str {
    if reversed {
        lines[lines.len() - 1 - idx]
    } else {
        lines[idx]
    }
}

fn unmatched(lines: &[&str], kept: &[bool]) -> Vec<DiffLine> {
    lines
        .iter()
        .zip(kept)
        .enumerate()
        .filter(|(_, (_, kept))| !**kept)
        .map(|(index, (text, _))| line(index, text))
        .collect()
}

fn line(index: usize, text: &str) -> DiffLine {
    DiffLine {
        line_no: index + 1,
        text: text.to_string(),
    }
}
