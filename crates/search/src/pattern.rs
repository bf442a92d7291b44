use crate::error::{Result, SearchError};
use regex::Regex;

/// Compile the user pattern, or its fuzzy form when `fuzzy` is set
pub fn compile_pattern(pattern: &str, fuzzy: bool) -> Result<Regex> {
    let source = if fuzzy {
        fuzzy_pattern(pattern)
    } else {
        pattern.to_string()
    };
    Regex::new(&source).map_err(|err| SearchError::pattern(pattern, err))
}

/// Case-insensitive subsequence regex: `abc` becomes `(?i)a.*b.*c`.
///
/// Each character is matched literally.
pub fn fuzzy_pattern(pattern: &str) -> String {
    let mut buf = [0u8; 4];
    let body: Vec<String> = pattern
        .chars()
        .map(|ch| regex::escape(ch.encode_utf8(&mut buf)))
        .collect();
    format!("(?i){}", body.join(".*"))
}
