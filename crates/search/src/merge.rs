//! Interval merging for snippets of a single file.

use crate::types::Snippet;
use std::cmp::Ordering;

/// Maximum gap (in lines) between two search snippets that still merges them
pub const ADJACENCY_BUFFER: usize = 3;

/// Fraction of the smaller snippet that must overlap for a range union
pub const OVERLAP_RATIO: f64 = 0.5;

/// When two consecutive snippets are combined
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeMode {
    /// Merge when the next snippet starts within `buffer` lines of the previous end
    Adjacent { buffer: usize },
    /// Union when the shared lines reach `ratio` of the smaller span;
    /// otherwise extend only if the ranges touch
    Overlap { ratio: f64 },
}

impl MergeMode {
    /// Pass applied to search results
    pub const SEARCH: Self = Self::Adjacent {
        buffer: ADJACENCY_BUFFER,
    };

    /// Pass applied when rendering results
    pub const RENDER: Self = Self::Overlap {
        ratio: OVERLAP_RATIO,
    };
}

/// Sort snippets and fold overlapping/adjacent ones together.
///
/// The output depends only on the set of input snippets, not their order.
pub fn merge_snippets(mut snippets: Vec<Snippet>, mode: MergeMode) -> Vec<Snippet> {
    if snippets.len() <= 1 {
        return snippets;
    }

    snippets.sort_by(compare_snippets);

    let mut merged: Vec<Snippet> = Vec::with_capacity(snippets.len());
    for current in snippets {
        let Some(previous) = merged.last_mut() else {
            merged.push(current);
            continue;
        };

        match mode {
            MergeMode::Adjacent { buffer } => {
                if current.start_line <= previous.end_line + buffer {
                    extend(previous, &current);
                    combine_match_info(previous, &current);
                } else {
                    merged.push(current);
                }
            }
            MergeMode::Overlap { ratio } => {
                let overlap = previous.overlap(&current);
                let smaller = previous.span().min(current.span());
                if overlap > 0 && overlap as f64 >= smaller as f64 * ratio {
                    union(previous, &current);
                    combine_match_info(previous, &current);
                } else if current.start_line > previous.end_line {
                    merged.push(current);
                } else {
                    extend(previous, &current);
                    combine_match_info(previous, &current);
                }
            }
        }
    }

    merged
}

fn compare_snippets(a: &Snippet, b: &Snippet) -> Ordering {
    a.start_line
        .cmp(&b.start_line)
        .then_with(|| a.end_line.cmp(&b.end_line))
        .then_with(|| a.match_info.cmp(&b.match_info))
        .then_with(|| a.content.cmp(&b.content))
}

/// Grow `previous` to the end of `current`, appending the newly covered
/// trailing lines of its content.
fn extend(previous: &mut Snippet, current: &Snippet) {
    if current.end_line <= previous.end_line {
        return;
    }

    let added = current.end_line - previous.end_line;
    let lines: Vec<&str> = current.content.split('\n').collect();
    let take = added.min(lines.len());
    if take > 0 {
        previous.content.push('\n');
        previous.content.push_str(&lines[lines.len() - take..].join("\n"));
    }
    previous.end_line = current.end_line;
}

/// Union of both ranges. The larger snippet's content is kept when it spans
/// the whole union; otherwise the tail of `current` is spliced on.
fn union(previous: &mut Snippet, current: &Snippet) {
    let start = previous.start_line.min(current.start_line);
    let end = previous.end_line.max(current.end_line);

    if current.span() >= previous.span() && current.start_line == start && current.end_line == end
    {
        previous.content.clone_from(&current.content);
        previous.start_line = start;
        previous.end_line = end;
    } else {
        extend(previous, current);
    }
}

fn combine_match_info(previous: &mut Snippet, current: &Snippet) {
    if previous.match_info != current.match_info {
        previous.match_info = format!(
            "Multiple matches between lines {}-{}",
            previous.start_line, previous.end_line
        );
    }
}
