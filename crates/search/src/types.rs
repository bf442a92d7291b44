use codeclip_scanner::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A contiguous line range around (or enclosing) a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    /// First line (1-indexed)
    pub start_line: usize,

    /// Last line (1-indexed, inclusive)
    pub end_line: usize,

    pub content: String,

    /// Human-readable description, e.g. `Match at line 12`
    pub match_info: String,
}

impl Snippet {
    pub fn new(
        start_line: usize,
        end_line: usize,
        content: impl Into<String>,
        match_info: impl Into<String>,
    ) -> Self {
        Self {
            start_line,
            end_line,
            content: content.into(),
            match_info: match_info.into(),
        }
    }

    /// `end - start`, the span used by the overlap threshold
    #[must_use]
    pub fn span(&self) -> usize {
        self.end_line.saturating_sub(self.start_line)
    }

    /// Lines shared with another snippet (inclusive ranges)
    #[must_use]
    pub fn overlap(&self, other: &Snippet) -> usize {
        let start = self.start_line.max(other.start_line);
        let end = self.end_line.min(other.end_line);
        if end >= start {
            end - start + 1
        } else {
            0
        }
    }
}

/// All merged snippets of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFile {
    pub path: PathBuf,
    pub language: Language,
    pub snippets: Vec<Snippet>,
}

/// Search output: one entry per file with at least one match, in input order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub files: Vec<SearchFile>,
}

impl SearchResult {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Total snippets across all files
    #[must_use]
    pub fn snippet_count(&self) -> usize {
        self.files.iter().map(|file| file.snippets.len()).sum()
    }

    /// Look up the entry for a path
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&SearchFile> {
        let path = path.as_ref();
        self.files.iter().find(|file| file.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_inclusive() {
        let a = Snippet::new(5, 10, "", "");
        let b = Snippet::new(9, 15, "", "");
        assert_eq!(a.overlap(&b), 2);
        assert_eq!(b.overlap(&a), 2);
        assert_eq!(a.overlap(&Snippet::new(11, 12, "", "")), 0);
        assert_eq!(a.span(), 5);
    }

    #[test]
    fn test_result_lookup() {
        let result = SearchResult {
            files: vec![SearchFile {
                path: PathBuf::from("src/main.go"),
                language: Language::Go,
                snippets: vec![Snippet::new(1, 2, "a\nb", "Match at line 1")],
            }],
        };
        assert!(result.get("src/main.go").is_some());
        assert!(result.get("src/other.go").is_none());
        assert_eq!(result.snippet_count(), 1);
        assert!(!result.is_empty());
    }
}
