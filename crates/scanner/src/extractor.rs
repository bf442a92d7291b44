use crate::error::{Result, ScannerError};
use crate::language::Language;
use crate::params::{parse_return_types, split_parameters};
use crate::registry::{has_dedicated_rules, rules_for, LanguageRule, LineForm};
use crate::types::{HeaderElement, HeaderKind};
use regex::Captures;
use std::path::Path;

/// Tokens that never name a struct/class member
const FIELD_STOPLIST: &[&str] = &["{", "}", "struct", "class"];

/// Line-based structural scanner driven by the per-language rule registry
#[derive(Debug, Default, Clone, Copy)]
pub struct HeaderExtractor;

impl HeaderExtractor {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Extract headers from a file on disk.
    ///
    /// Invalid UTF-8 is replaced rather than rejected; only IO failures error.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<Vec<HeaderElement>> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| ScannerError::io(path, err))?;
        let content = String::from_utf8_lossy(&bytes);
        let language = Language::from_path(path);

        let headers = self.extract_with_language(&content, language);
        log::debug!(
            "Extracted {} headers from {} ({language})",
            headers.len(),
            path.display()
        );
        Ok(headers)
    }

    /// Extract headers from in-memory content; the path only selects the language
    #[must_use]
    pub fn extract_str(&self, content: &str, file_path: Option<&str>) -> Vec<HeaderElement> {
        let language = file_path.map_or(Language::Plaintext, Language::from_path);
        self.extract_with_language(content, language)
    }

    /// Extract headers with an explicit language
    #[must_use]
    pub fn extract_with_language(&self, content: &str, language: Language) -> Vec<HeaderElement> {
        let lines: Vec<&str> = content.lines().collect();
        let rules = rules_for(language);
        if !has_dedicated_rules(language) {
            log::debug!("No {language} rules, using generic patterns");
        }

        let mut headers = Vec::new();
        let mut depth: isize = 0;
        let mut current_class: Option<String> = None;
        let mut import_block: Option<HeaderElement> = None;

        for (idx, &raw) in lines.iter().enumerate() {
            let line_num = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || language.is_comment_line(trimmed) {
                continue;
            }

            if language == Language::Python && !raw.starts_with([' ', '\t']) {
                current_class = None;
            }

            let top_level = depth == 0;
            depth += brace_delta(trimmed);

            if let Some(mut block) = import_block.take() {
                if trimmed == ")" {
                    block.end_line = Some(line_num);
                    headers.push(block);
                } else {
                    block.children.push(import_block_entry(trimmed, line_num));
                    import_block = Some(block);
                }
                continue;
            }

            let matched = rules
                .iter()
                .filter(|rule| top_level || !rule.opens_import_block)
                .find_map(|rule| {
                    let text = match rule.line_form {
                        LineForm::Trimmed => trimmed,
                        LineForm::Raw => raw,
                    };
                    rule.pattern
                        .captures(text)
                        .filter(|caps| !rule.name(caps).trim().is_empty())
                        .map(|caps| (rule, caps))
                });
            let Some((rule, caps)) = matched else {
                continue;
            };

            let mut header = build_header(rule, &caps, trimmed, line_num, language);

            if language == Language::Python {
                match rule.kind {
                    HeaderKind::Method if header.parent.is_none() => {
                        header.parent = current_class.clone();
                    }
                    HeaderKind::Class => current_class = Some(header.name.clone()),
                    HeaderKind::Import => header.children = python_import_children(&header),
                    _ => {}
                }
            }

            if rule.opens_import_block {
                import_block = Some(header);
                continue;
            }

            if rule.kind.has_members() {
                extract_members(&mut header, idx, &lines);
            }

            headers.push(header);
        }

        if let Some(mut block) = import_block {
            log::debug!("Import block at line {} is not closed", block.line);
            block.end_line = Some(lines.len());
            headers.push(block);
        }

        if depth != 0 {
            log::debug!("Unbalanced braces in {language} source (depth {depth} at end of file)");
        }

        headers
    }
}

/// Extract headers from a file using the default extractor
pub fn extract_headers(path: impl AsRef<Path>) -> Result<Vec<HeaderElement>> {
    HeaderExtractor::new().extract_file(path)
}

fn build_header(
    rule: &LanguageRule,
    caps: &Captures<'_>,
    trimmed: &str,
    line: usize,
    language: Language,
) -> HeaderElement {
    let mut header = HeaderElement::new(rule.kind, rule.name(caps).trim(), line);

    header.signature = Some(
        rule.group(caps, rule.signature_group)
            .unwrap_or(trimmed)
            .to_string(),
    );
    header.scope = rule.group(caps, rule.scope_group).map(str::to_string);
    header.parent = rule.group(caps, rule.parent_group).map(str::to_string);
    header.alias = rule.group(caps, rule.alias_group).map(str::to_string);

    if let Some(raw) = rule.group(caps, rule.params_group) {
        header.parameters = split_parameters(raw, language);
    }
    if let Some(raw) = rule.group(caps, rule.returns_group) {
        header.return_types = parse_return_types(raw, language);
    }

    if matches!(rule.kind, HeaderKind::Constant | HeaderKind::Variable) {
        header.value_type = rule
            .group(caps, rule.value_type_group)
            .map(str::trim)
            .filter(|ty| !ty.is_empty())
            .map(str::to_string);
        header.value = rule
            .group(caps, rule.value_group)
            .map(strip_trailing_comment)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
    }

    header
}

/// One entry of a Go `import ( ... )` block: `"path"` or `alias "path"`
fn import_block_entry(trimmed: &str, line: usize) -> HeaderElement {
    let spec = strip_trailing_comment(trimmed);
    match spec.split_once(char::is_whitespace) {
        Some((alias, path)) if path.trim_start().starts_with(['"', '`']) => {
            HeaderElement::new(HeaderKind::Import, unquote(path), line).with_alias(alias)
        }
        _ => HeaderElement::new(HeaderKind::Import, unquote(spec), line),
    }
}

/// Split `import a, b as c` / `from m import (x, y)` into one child per name
fn python_import_children(header: &HeaderElement) -> Vec<HeaderElement> {
    let names = header.name.split('#').next().unwrap_or_default();

    names
        .split(',')
        .map(|item| item.trim().trim_matches(['(', ')']).trim())
        .filter(|item| !item.is_empty())
        .map(|item| {
            let mut child = match item.split_once(" as ") {
                Some((name, alias)) => {
                    HeaderElement::new(HeaderKind::Import, name.trim(), header.line)
                        .with_alias(alias.trim())
                }
                None => HeaderElement::new(HeaderKind::Import, item, header.line),
            };
            child.parent = header.parent.clone();
            child
        })
        .collect()
}

/// Collect speculative fields of a struct/class body and record its end line.
///
/// Starts at the declaration line; the first line with `{` opens the body
/// and is not itself scanned for a field.
fn extract_members(header: &mut HeaderElement, start: usize, lines: &[&str]) {
    let mut depth: isize = 0;
    let mut opened = false;

    for (idx, raw) in lines.iter().enumerate().skip(start) {
        let line = raw.trim();

        if opened {
            depth += brace_delta(line);
            if line.contains(':') || line.contains(' ') {
                if let Some(field) = extract_field(line) {
                    header
                        .children
                        .push(HeaderElement::new(HeaderKind::Field, field, idx + 1));
                }
            }
        } else if line.contains('{') {
            opened = true;
            depth += brace_delta(line);
        } else {
            continue;
        }

        if depth <= 0 {
            header.end_line = Some(idx + 1);
            return;
        }
    }
}

fn extract_field(line: &str) -> Option<String> {
    if line.starts_with("//") || line.starts_with("/*") {
        return None;
    }

    let token = strip_trailing_comment(line)
        .split_whitespace()
        .next()?
        .trim_matches([':', ',']);

    if token.is_empty() || FIELD_STOPLIST.contains(&token) {
        None
    } else {
        Some(token.to_string())
    }
}

fn brace_delta(line: &str) -> isize {
    line.chars().fold(0, |delta, ch| match ch {
        '{' => delta + 1,
        '}' => delta - 1,
        _ => delta,
    })
}

fn strip_trailing_comment(text: &str) -> &str {
    text.split_once("//")
        .map_or(text, |(code, _)| code)
        .trim()
}

fn unquote(text: &str) -> &str {
    text.trim().trim_matches(['"', '`'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Parameter;
    use pretty_assertions::assert_eq;

    fn extract(content: &str, language: Language) -> Vec<HeaderElement> {
        HeaderExtractor::new().extract_with_language(content, language)
    }

    #[test]
    fn go_method_with_receiver() {
        let headers = extract(
            "package store\n\nfunc (r *Repo) Save(id int, name string) (bool, error) {\n\treturn true, nil\n}\n",
            Language::Go,
        );
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].kind, HeaderKind::Package);

        let method = &headers[1];
        assert_eq!(method.kind, HeaderKind::Method);
        assert_eq!(method.name, "Save");
        assert_eq!(method.line, 3);
        assert_eq!(method.parent.as_deref(), Some("Repo"));
        assert_eq!(
            method.parameters,
            vec![Parameter::new("id", "int"), Parameter::new("name", "string")]
        );
        assert_eq!(method.return_types, vec!["bool", "error"]);
    }

    #[test]
    fn go_struct_fields_and_end_line() {
        let source = "type Repo struct {\n\tdb   *sql.DB // handle\n\n\tName string\n}\n\nfunc New() *Repo {\n}\n";
        let headers = extract(source, Language::Go);

        let repo = &headers[0];
        assert_eq!(repo.kind, HeaderKind::Struct);
        assert_eq!(repo.end_line, Some(5));
        let fields: Vec<(&str, usize)> = repo
            .children
            .iter()
            .map(|child| (child.name.as_str(), child.line))
            .collect();
        assert_eq!(fields, vec![("db", 2), ("Name", 4)]);

        assert_eq!(headers[1].name, "New");
        assert_eq!(headers[1].return_types, vec!["*Repo"]);
    }

    #[test]
    fn go_import_block() {
        let source = "import (\n\t\"fmt\"\n\t// comment\n\tstr \"strings\"\n)\n\nimport \"os\"\n";
        let headers = extract(source, Language::Go);
        assert_eq!(headers.len(), 2);

        let block = &headers[0];
        assert_eq!(block.kind, HeaderKind::Import);
        assert_eq!(block.line, 1);
        assert_eq!(block.end_line, Some(5));
        assert_eq!(block.children.len(), 2);
        assert_eq!(block.children[0].name, "fmt");
        assert_eq!(block.children[1].name, "strings");
        assert_eq!(block.children[1].alias.as_deref(), Some("str"));

        assert_eq!(headers[1].name, "os");
        assert_eq!(headers[1].line, 7);
    }

    #[test]
    fn unterminated_import_block_ends_at_last_line() {
        let headers = extract("import (\n\t\"fmt\"\n\t\"os\"", Language::Go);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].end_line, Some(3));
        assert_eq!(headers[0].children.len(), 2);
    }

    #[test]
    fn import_block_only_at_top_level() {
        let headers = extract("func f() {\nimport (\n\"fmt\"\n)\n}\n", Language::Go);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].kind, HeaderKind::Function);
    }

    #[test]
    fn go_constants_and_variables() {
        let source = "const MaxSize int = 100 // bytes\nvar ErrMissing = errors.New(\"missing\")\nvar count int\n";
        let headers = extract(source, Language::Go);
        assert_eq!(headers.len(), 3);

        assert_eq!(headers[0].kind, HeaderKind::Constant);
        assert_eq!(headers[0].value_type.as_deref(), Some("int"));
        assert_eq!(headers[0].value.as_deref(), Some("100"));

        assert_eq!(headers[1].value_type, None);
        assert_eq!(headers[1].value.as_deref(), Some("errors.New(\"missing\")"));

        assert_eq!(headers[2].value_type.as_deref(), Some("int"));
        assert_eq!(headers[2].value, None);
    }

    #[test]
    fn python_classes_methods_and_imports() {
        let source = "\
import os, sys as system
from typing import List, Dict as D

MAX_RETRIES: int = 3

class Repo(Base):
    def save(self, item: str, force=False) -> bool:
        pass

def helper(x):
    return x
";
        let headers = extract(source, Language::Python);
        let kinds: Vec<HeaderKind> = headers.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HeaderKind::Import,
                HeaderKind::Import,
                HeaderKind::Variable,
                HeaderKind::Class,
                HeaderKind::Method,
                HeaderKind::Function,
            ]
        );

        let plain = &headers[0];
        assert_eq!(plain.children.len(), 2);
        assert_eq!(plain.children[1].name, "sys");
        assert_eq!(plain.children[1].alias.as_deref(), Some("system"));

        let from = &headers[1];
        assert_eq!(from.parent.as_deref(), Some("typing"));
        assert!(from
            .children
            .iter()
            .all(|child| child.parent.as_deref() == Some("typing")));
        assert_eq!(from.children[1].alias.as_deref(), Some("D"));

        assert_eq!(headers[2].value_type.as_deref(), Some("int"));
        assert_eq!(headers[2].value.as_deref(), Some("3"));

        assert_eq!(headers[3].parameters, vec![Parameter::new("Base", "")]);

        let save = &headers[4];
        assert_eq!(save.parent.as_deref(), Some("Repo"));
        assert_eq!(
            save.parameters,
            vec![Parameter::new("item", "str"), Parameter::new("force", "")]
        );
        assert_eq!(save.return_types, vec!["bool"]);

        assert_eq!(headers[5].name, "helper");
        assert_eq!(headers[5].parent, None);
    }

    #[test]
    fn c_preprocessor_lines_are_not_comments() {
        let source = "#include <stdio.h>\n#define MAX 10\n\nint main(int argc, char **argv) {\n  return 0;\n}\n";
        let headers = extract(source, Language::C);
        let summary: Vec<(HeaderKind, &str)> = headers
            .iter()
            .map(|h| (h.kind, h.name.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HeaderKind::Import, "stdio.h"),
                (HeaderKind::Define, "MAX"),
                (HeaderKind::Function, "main"),
            ]
        );
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let headers = extract("// func hidden() {\n\n/* func other() */\nfunc shown() {\n}\n", Language::Go);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].name, "shown");
        assert_eq!(headers[0].line, 4);
    }

    #[test]
    fn unknown_language_uses_generic_rules() {
        let headers = HeaderExtractor::new().extract_str(
            "function build(x) {\n}\nclass Widget\n",
            Some("script.unknown"),
        );
        assert_eq!(headers.len(), 2);
        assert_eq!(headers[0].name, "build");
        assert_eq!(headers[1].kind, HeaderKind::Class);
        assert_eq!(headers[1].name, "Widget");
    }

    #[test]
    fn no_matches_is_empty() {
        assert!(extract("just some text\nwith nothing in it\n", Language::Go).is_empty());
        assert!(extract("", Language::Python).is_empty());
    }

    #[test]
    fn line_numbers_never_decrease() {
        let source = "package a\nimport \"fmt\"\ntype A struct {\n  x int\n}\nfunc f() {}\nfunc (a A) g() {}\n";
        let headers = extract(source, Language::Go);
        assert!(headers.windows(2).all(|pair| pair[0].line <= pair[1].line));
    }

    #[test]
    fn field_extraction() {
        assert_eq!(extract_field("Name string `json:\"name\"`").as_deref(), Some("Name"));
        assert_eq!(extract_field("id: number,").as_deref(), Some("id"));
        assert_eq!(extract_field("} Foo;"), None);
        assert_eq!(extract_field("// note"), None);
    }
}
