use serde::{Deserialize, Serialize};

/// Lines of context on each side of a match unless configured otherwise
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Search behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Lines of context before and after each match
    pub context_lines: usize,

    /// Return the enclosing function instead of a context window
    pub whole_function: bool,

    /// Treat the pattern as a case-insensitive subsequence
    pub fuzzy: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            context_lines: DEFAULT_CONTEXT_LINES,
            whole_function: false,
            fuzzy: false,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    #[must_use]
    pub fn with_whole_function(mut self, whole_function: bool) -> Self {
        self.whole_function = whole_function;
        self
    }

    #[must_use]
    pub fn with_fuzzy(mut self, fuzzy: bool) -> Self {
        self.fuzzy = fuzzy;
        self
    }
}
