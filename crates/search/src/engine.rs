use crate::error::{Result, SearchError};
use crate::merge::{merge_snippets, MergeMode};
use crate::options::SearchOptions;
use crate::pattern::compile_pattern;
use crate::types::{SearchFile, SearchResult, Snippet};
use codeclip_scanner::Language;
use regex::Regex;
use std::path::Path;

/// Lines taken after a function start when its closing brace is not found
pub const FUNCTION_FALLBACK_LINES: usize = 20;

const FUNCTION_KEYWORDS: &[&str] = &["func ", "function "];

/// Search `files` for `pattern` and return merged snippets per matching file.
///
/// The pattern is compiled before any file is read, so an invalid pattern
/// fails without touching the filesystem.
pub fn search<P: AsRef<Path>>(
    files: &[P],
    pattern: &str,
    options: &SearchOptions,
) -> Result<SearchResult> {
    SnippetSearcher::new(pattern, *options)?.search_files(files)
}

/// A compiled pattern plus the options it runs with
#[derive(Debug, Clone)]
pub struct SnippetSearcher {
    regex: Regex,
    options: SearchOptions,
}

impl SnippetSearcher {
    pub fn new(pattern: &str, options: SearchOptions) -> Result<Self> {
        let regex = compile_pattern(pattern, options.fuzzy)?;
        Ok(Self { regex, options })
    }

    /// Search files in order; files without matches are left out
    pub fn search_files<P: AsRef<Path>>(&self, files: &[P]) -> Result<SearchResult> {
        let mut result = SearchResult::default();
        for path in files {
            if let Some(file) = self.search_file(path.as_ref())? {
                result.files.push(file);
            }
        }

        log::debug!(
            "Search matched {} snippets in {} of {} files",
            result.snippet_count(),
            result.files.len(),
            files.len()
        );
        Ok(result)
    }

    /// Search a single file, returning `None` when nothing matches
    pub fn search_file(&self, path: &Path) -> Result<Option<SearchFile>> {
        let bytes = std::fs::read(path).map_err(|err| SearchError::io(path, err))?;
        let content = String::from_utf8_lossy(&bytes);
        let lines: Vec<&str> = content.lines().collect();

        let candidates = self.search_lines(&lines);
        if candidates.is_empty() {
            return Ok(None);
        }

        let found = candidates.len();
        let mut snippets = merge_snippets(candidates, MergeMode::SEARCH);
        // The merge splices text by line count; the lines are at hand, so
        // re-slice each merged range exactly.
        for snippet in &mut snippets {
            snippet.content = slice_lines(&lines, snippet.start_line - 1, snippet.end_line - 1);
        }
        log::debug!(
            "{}: {found} matches, {} snippets after merge",
            path.display(),
            snippets.len()
        );

        Ok(Some(SearchFile {
            path: path.to_path_buf(),
            language: Language::from_path(path),
            snippets,
        }))
    }

    /// One unmerged snippet per matching line
    #[must_use]
    pub fn search_lines(&self, lines: &[&str]) -> Vec<Snippet> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.regex.is_match(line))
            .map(|(idx, _)| extract_snippet(lines, idx, &self.options))
            .collect()
    }
}

/// Build the snippet for a match on `match_idx` (0-indexed)
#[must_use]
pub fn extract_snippet(lines: &[&str], match_idx: usize, options: &SearchOptions) -> Snippet {
    let last = lines.len().saturating_sub(1);

    if options.whole_function {
        let (start, end) = find_function_bounds(lines, match_idx);
        return Snippet::new(
            start + 1,
            end + 1,
            slice_lines(lines, start, end),
            format!("Function containing match at line {}", match_idx + 1),
        );
    }

    let start = match_idx.saturating_sub(options.context_lines);
    let end = match_idx.saturating_add(options.context_lines).min(last);
    Snippet::new(
        start + 1,
        end + 1,
        slice_lines(lines, start, end),
        format!("Match at line {}", match_idx + 1),
    )
}

/// Heuristic bounds (0-indexed, inclusive) of the function around a match.
///
/// Walks back to the nearest line containing `func ` or `function ` (or the
/// first line), then forward until brace depth drops to zero past the match.
/// Without a closing brace the range is [`FUNCTION_FALLBACK_LINES`] long,
/// clamped to the file and never ending before the match.
#[must_use]
pub fn find_function_bounds(lines: &[&str], match_idx: usize) -> (usize, usize) {
    let last = lines.len().saturating_sub(1);
    let match_idx = match_idx.min(last);

    let mut start = match_idx;
    while start > 0 && !FUNCTION_KEYWORDS.iter().any(|kw| lines[start].contains(kw)) {
        start -= 1;
    }

    let mut depth: isize = 0;
    for (idx, line) in lines.iter().enumerate().skip(start) {
        depth += line.matches('{').count() as isize - line.matches('}').count() as isize;
        if depth <= 0 && idx > match_idx {
            return (start, idx);
        }
    }

    let end = (start + FUNCTION_FALLBACK_LINES).min(last).max(match_idx);
    (start, end)
}

fn slice_lines(lines: &[&str], start: usize, end: usize) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let end = end.min(lines.len() - 1);
    lines[start.min(end)..=end].join("\n")
}
