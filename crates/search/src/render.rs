use crate::merge::{merge_snippets, MergeMode};
use crate::types::SearchResult;
use std::fmt::Write;

/// Render results as fenced markdown blocks, one per snippet.
///
/// Snippets are merged again in overlap mode before rendering.
#[must_use]
pub fn format_search_results(result: &SearchResult) -> String {
    let mut out = String::new();

    for file in &result.files {
        for snippet in merge_snippets(file.snippets.clone(), MergeMode::RENDER) {
            let _ = writeln!(
                out,
                "```{} filename={} (lines {}-{})",
                file.language,
                file.path.display(),
                snippet.start_line,
                snippet.end_line
            );
            out.push_str(&snippet.content);
            out.push_str("\n```\n\n");
        }
    }

    out
}
