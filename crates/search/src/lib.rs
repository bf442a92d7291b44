//! # Codeclip Search
//!
//! Line-by-line regex search over source files. Every matching line yields a
//! snippet: either a context window or the enclosing function found by a
//! brace-counting heuristic. Snippets of one file are then merged so nearby
//! matches share a single block.
//!
//! ```rust,no_run
//! use codeclip_search::{format_search_results, search, SearchOptions};
//!
//! let options = SearchOptions::default().with_context_lines(2);
//! let result = search(&["src/main.go"], "TODO", &options).unwrap();
//! print!("{}", format_search_results(&result));
//! ```

mod engine;
mod error;
mod merge;
mod options;
mod pattern;
mod render;
mod types;

pub use engine::{
    extract_snippet, find_function_bounds, search, SnippetSearcher, FUNCTION_FALLBACK_LINES,
};
pub use error::{Result, SearchError};
pub use merge::{merge_snippets, MergeMode, ADJACENCY_BUFFER, OVERLAP_RATIO};
pub use options::{SearchOptions, DEFAULT_CONTEXT_LINES};
pub use pattern::{compile_pattern, fuzzy_pattern};
pub use render::format_search_results;
pub use types::{SearchFile, SearchResult, Snippet};
