//! Parameter-list and return-type parsing.
//!
//! Works on the raw text captured between a declaration's parentheses; it does
//! not understand the language beyond bracket nesting and a few separators.

use crate::language::Language;
use crate::types::Parameter;

/// How a language writes `name`/`type` pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamStyle {
    /// `a, b int`: names first, shared trailing type
    Go,
    /// `name: Type = default`
    Python,
    /// `name: Type` (JavaScript, TypeScript, Rust)
    Colon,
    /// `Type name`, last token taken as the type
    Generic,
}

impl ParamStyle {
    fn for_language(language: Language) -> Self {
        match language {
            Language::Go => Self::Go,
            Language::Python => Self::Python,
            Language::JavaScript | Language::TypeScript | Language::Rust => Self::Colon,
            _ => Self::Generic,
        }
    }
}

/// Split on commas that are not nested inside `<>`, `()`, `[]` or `{}`.
///
/// Depth never drops below zero, so a stray `>` (as in `->`) does not swallow
/// the separators that follow it. A trailing comma yields no empty group.
pub fn split_respecting_brackets(raw: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, ch) in raw.char_indices() {
        match ch {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                groups.push(&raw[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    if start < raw.len() {
        groups.push(&raw[start..]);
    }

    groups
}

/// Split a raw parameter list into typed parameters
pub fn split_parameters(raw: &str, language: Language) -> Vec<Parameter> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let groups: Vec<&str> = split_respecting_brackets(raw)
        .into_iter()
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .collect();

    match ParamStyle::for_language(language) {
        ParamStyle::Go => go_parameters(&groups),
        ParamStyle::Python => groups.iter().map(|g| python_parameter(g)).collect(),
        ParamStyle::Colon => groups.iter().map(|g| colon_parameter(g)).collect(),
        ParamStyle::Generic => groups.iter().map(|g| generic_parameter(g)).collect(),
    }
}

/// Parse the return-type text of a declaration.
///
/// Go results wrapped in parentheses are split into one entry per value;
/// everything else is a single entry.
pub fn parse_return_types(raw: &str, language: Language) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }

    if language == Language::Go && raw.starts_with('(') && raw.ends_with(')') {
        return split_respecting_brackets(&raw[1..raw.len() - 1])
            .into_iter()
            .map(str::trim)
            .filter(|ty| !ty.is_empty())
            .map(str::to_string)
            .collect();
    }

    vec![raw.to_string()]
}

fn go_parameters(groups: &[&str]) -> Vec<Parameter> {
    let tokenized: Vec<Vec<&str>> = groups
        .iter()
        .map(|group| group.split_whitespace().collect())
        .collect();

    // Go parameters are either all named or all unnamed.
    let named = tokenized.iter().any(|tokens| tokens.len() >= 2);
    if !named {
        return tokenized
            .iter()
            .map(|tokens| Parameter::new("", tokens.join(" ")))
            .collect();
    }

    let mut params = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    for tokens in &tokenized {
        let Some((name, rest)) = tokens.split_first() else {
            continue;
        };
        if rest.is_empty() {
            pending.push(*name);
            continue;
        }

        let ty = rest.join(" ");
        for shared in pending.drain(..) {
            params.push(Parameter::new(shared, ty.clone()));
        }
        params.push(Parameter::new(*name, ty));
    }

    // Names with no type after them; not valid Go, kept as untyped names.
    params.extend(pending.into_iter().map(|name| Parameter::new(name, "")));
    params
}

fn python_parameter(group: &str) -> Parameter {
    match group.split_once(':') {
        Some((name, ty)) => Parameter::new(strip_default(name), strip_default(ty)),
        None => Parameter::new(strip_default(group), ""),
    }
}

fn colon_parameter(group: &str) -> Parameter {
    match group.split_once(':') {
        Some((name, ty)) => Parameter::new(name.trim(), ty.trim()),
        None => Parameter::new(group, ""),
    }
}

fn generic_parameter(group: &str) -> Parameter {
    let tokens: Vec<&str> = group.split_whitespace().collect();
    match tokens.split_last() {
        Some((ty, names)) if !names.is_empty() => Parameter::new(names.join(" "), *ty),
        Some((name, _)) => Parameter::new(*name, ""),
        None => Parameter::default(),
    }
}

fn strip_default(text: &str) -> &str {
    text.split_once('=')
        .map_or(text, |(before, _)| before)
        .trim()
}
