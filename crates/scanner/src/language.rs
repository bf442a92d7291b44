use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Language tag derived from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Java,
    C,
    Cpp,
    CSharp,
    Ruby,
    Php,
    Perl,
    Bash,
    Html,
    Css,
    Markdown,
    Json,
    Yaml,
    Plaintext,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "go" => Language::Go,
            "rs" => Language::Rust,
            "py" | "pyw" => Language::Python,
            "js" | "mjs" | "cjs" | "jsx" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "java" => Language::Java,
            "c" | "h" => Language::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "cs" => Language::CSharp,
            "rb" => Language::Ruby,
            "php" => Language::Php,
            "pl" => Language::Perl,
            "sh" | "bash" => Language::Bash,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            "md" => Language::Markdown,
            "json" => Language::Json,
            "yaml" | "yml" => Language::Yaml,
            _ => Language::Plaintext,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Plaintext)
    }

    /// Get language tag as string (also used as the markdown fence tag)
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Java => "java",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Ruby => "ruby",
            Language::Php => "php",
            Language::Perl => "perl",
            Language::Bash => "bash",
            Language::Html => "html",
            Language::Css => "css",
            Language::Markdown => "markdown",
            Language::Json => "json",
            Language::Yaml => "yaml",
            Language::Plaintext => "plaintext",
        }
    }

    /// Prefixes that mark a whole line as a comment for the header scan.
    ///
    /// `#` is only a comment marker where the language treats it as one, so C
    /// preprocessor lines stay visible to the `#define`/`#include` rules.
    pub fn comment_prefixes(self) -> &'static [&'static str] {
        match self {
            Language::Go
            | Language::Rust
            | Language::JavaScript
            | Language::TypeScript
            | Language::Java
            | Language::C
            | Language::Cpp
            | Language::CSharp
            | Language::Css => &["//", "/*"],
            Language::Python
            | Language::Ruby
            | Language::Perl
            | Language::Bash
            | Language::Yaml => &["#"],
            Language::Php => &["//", "/*", "#"],
            Language::Html | Language::Markdown | Language::Json | Language::Plaintext => {
                &["//", "#", "/*"]
            }
        }
    }

    /// Check whether a trimmed line starts with one of the comment prefixes
    pub fn is_comment_line(self, trimmed: &str) -> bool {
        self.comment_prefixes()
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
