//! Template expansion: `{{path}}` and `{{glob}}` tags are replaced by the
//! referenced source as fenced markdown.

use anyhow::{Context, Result};
use codeclip_finder::{format_files, read_files, FileContent, FileFinder, FinderError};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

/// `{{...}}`, allowing one level of `{a,b}` alternation inside the tag
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{((?:[^{}]|\{[^{}]*\})+)\}\}").expect("valid template tag regex")
});

pub struct TemplateProcessor {
    finder: FileFinder,
}

impl TemplateProcessor {
    /// Tags resolve against the finder's base directory and exclusions
    pub fn new(finder: FileFinder) -> Self {
        Self { finder }
    }

    /// Process the template file at `path`
    pub fn process(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("template file not found: {}", path.display());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display()))?;
        Ok(self.process_str(&text))
    }

    pub fn process_str(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in text.lines() {
            let processed = self.process_line(line);
            out.push_str(&processed);
            if !processed.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }

    fn process_line(&self, line: &str) -> String {
        let tags: Vec<(String, String)> = TAG
            .captures_iter(line)
            .map(|caps| (caps[0].to_string(), caps[1].trim().to_string()))
            .collect();

        let mut processed = line.to_string();
        for (full, tag) in tags {
            let replacement = self.resolve_tag(&tag).unwrap_or_else(|err| {
                log::warn!("Failed to resolve template tag {tag}: {err}");
                format!("<!-- Failed to resolve {tag}: {err} -->")
            });

            if line.trim() == full {
                processed = replacement;
            } else {
                processed = processed.replacen(&full, &replacement, 1);
            }
        }
        processed
    }

    fn resolve_tag(&self, tag: &str) -> Result<String, FinderError> {
        if tag.contains('*') {
            self.resolve_glob(tag)
        } else {
            self.resolve_file(tag)
        }
    }

    fn resolve_file(&self, tag: &str) -> Result<String, FinderError> {
        let path = Path::new(tag);
        let path: PathBuf = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.finder.base().join(path)
        };

        match FileContent::read(&path) {
            Ok(file) => Ok(format!("```{}\n{}\n```", file.language, file.content)),
            Err(err) if err.is_not_found() => {
                log::debug!("Template reference {} not found", path.display());
                Ok(String::new())
            }
            Err(err) => Err(err),
        }
    }

    fn resolve_glob(&self, pattern: &str) -> Result<String, FinderError> {
        let paths = self.finder.find(pattern)?;
        if paths.is_empty() {
            log::debug!("Template glob {pattern:?} matched nothing");
            return Ok(String::new());
        }
        Ok(format_files(&read_files(&paths)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn processor(base: impl AsRef<Path>) -> TemplateProcessor {
        TemplateProcessor::new(FileFinder::new(base))
    }

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.go"), "package main").unwrap();
        fs::write(dir.path().join("src/util.ts"), "export {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "remember").unwrap();
        dir
    }

    #[test]
    fn whole_line_file_tag() {
        let dir = project();
        let out =
            processor(dir.path()).process_str("# Context\n{{ src/main.go }}\nend");
        assert_eq!(out, "# Context\n```go\npackage main\n```\nend\n");
    }

    #[test]
    fn inline_tag_is_replaced_in_place() {
        let dir = project();
        let out = processor(dir.path()).process_str("see {{notes.txt}} here");
        assert_eq!(out, "see ```plaintext\nremember\n``` here\n");
    }

    #[test]
    fn glob_tag_renders_all_matches() {
        let dir = project();
        let out = processor(dir.path()).process_str("{{src/*.{go,ts}}}");
        let main = dir.path().join("src/main.go");
        let util = dir.path().join("src/util.ts");
        assert_eq!(
            out,
            format!(
                "```go filename={}\npackage main\n```\n\n```typescript filename={}\nexport {{}}\n```\n\n",
                main.display(),
                util.display()
            )
        );
    }

    #[test]
    fn missing_references_resolve_to_nothing() {
        let dir = project();
        let template = processor(dir.path());
        assert_eq!(template.process_str("a {{gone.rs}} b"), "a  b\n");
        assert_eq!(template.process_str("{{**/*.py}}"), "\n");
    }

    #[test]
    fn invalid_glob_leaves_comment() {
        let dir = project();
        let out = processor(dir.path()).process_str("{{src/*[}}");
        assert!(out.starts_with("<!-- Failed to resolve src/*[: "), "{out}");
        assert!(out.ends_with(" -->\n"));
    }

    #[test]
    fn plain_lines_pass_through() {
        let template = processor(".");
        assert_eq!(template.process_str("one\r\ntwo"), "one\ntwo\n");
        assert_eq!(template.process_str(""), "");
    }

    #[test]
    fn missing_template_is_error() {
        let dir = project();
        let err = processor(dir.path())
            .process(dir.path().join("nope.md"))
            .unwrap_err();
        assert!(err.to_string().starts_with("template file not found: "));
    }
}
