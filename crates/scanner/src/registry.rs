//! Per-language line rules.
//!
//! Each language maps to an ordered rule list; the extractor applies the
//! first rule whose pattern matches a line. The table is built once on first
//! use and is read-only afterwards.

use crate::language::Language;
use crate::types::HeaderKind;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

/// Which form of the source line a rule is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineForm {
    /// Leading and trailing whitespace removed
    Trimmed,
    /// Line as written; used by rules that depend on indentation
    Raw,
}

/// A line-matching rule and the roles of its capture groups
#[derive(Debug, Clone)]
pub struct LanguageRule {
    pub kind: HeaderKind,
    pub pattern: Regex,
    pub line_form: LineForm,
    /// Group holding the element name (0 = whole match)
    pub name_group: usize,
    pub signature_group: Option<usize>,
    pub scope_group: Option<usize>,
    pub parent_group: Option<usize>,
    pub params_group: Option<usize>,
    pub returns_group: Option<usize>,
    pub alias_group: Option<usize>,
    pub value_type_group: Option<usize>,
    pub value_group: Option<usize>,
    /// A match starts a multi-line `import ( ... )` block
    pub opens_import_block: bool,
}

impl LanguageRule {
    /// Create a rule from a pattern known to be valid.
    ///
    /// Panics on an invalid pattern; only called with the literals below.
    fn new(kind: HeaderKind, pattern: &str, name_group: usize) -> Self {
        Self {
            kind,
            pattern: Regex::new(pattern)
                .unwrap_or_else(|err| panic!("invalid {kind} rule {pattern:?}: {err}")),
            line_form: LineForm::Trimmed,
            name_group,
            signature_group: None,
            scope_group: None,
            parent_group: None,
            params_group: None,
            returns_group: None,
            alias_group: None,
            value_type_group: None,
            value_group: None,
            opens_import_block: false,
        }
    }

    fn signature(mut self, group: usize) -> Self {
        self.signature_group = Some(group);
        self
    }

    fn scope(mut self, group: usize) -> Self {
        self.scope_group = Some(group);
        self
    }

    fn parent(mut self, group: usize) -> Self {
        self.parent_group = Some(group);
        self
    }

    fn params(mut self, group: usize) -> Self {
        self.params_group = Some(group);
        self
    }

    fn returns(mut self, group: usize) -> Self {
        self.returns_group = Some(group);
        self
    }

    fn alias(mut self, group: usize) -> Self {
        self.alias_group = Some(group);
        self
    }

    fn value_type(mut self, group: usize) -> Self {
        self.value_type_group = Some(group);
        self
    }

    fn value(mut self, group: usize) -> Self {
        self.value_group = Some(group);
        self
    }

    fn raw_line(mut self) -> Self {
        self.line_form = LineForm::Raw;
        self
    }

    fn import_block(mut self) -> Self {
        self.opens_import_block = true;
        self
    }

    /// Text of an optional capture group; non-participating and empty groups
    /// are both `None`.
    pub fn group<'t>(&self, caps: &Captures<'t>, group: Option<usize>) -> Option<&'t str> {
        group
            .and_then(|idx| caps.get(idx))
            .map(|m| m.as_str())
            .filter(|text| !text.is_empty())
    }

    /// Element name for a match
    pub fn name<'t>(&self, caps: &Captures<'t>) -> &'t str {
        caps.get(self.name_group).map_or("", |m| m.as_str())
    }
}

static REGISTRY: Lazy<HashMap<Language, Vec<LanguageRule>>> = Lazy::new(|| {
    HashMap::from([
        (Language::Go, go_rules()),
        (Language::Python, python_rules()),
        (Language::Java, java_rules()),
        (Language::JavaScript, javascript_rules()),
        (Language::TypeScript, typescript_rules()),
        (Language::C, c_rules()),
        (Language::Cpp, cpp_rules()),
        (Language::CSharp, csharp_rules()),
        (Language::Ruby, ruby_rules()),
        (Language::Php, php_rules()),
        (Language::Rust, rust_rules()),
    ])
});

static GENERIC_RULES: Lazy<Vec<LanguageRule>> = Lazy::new(|| {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Function, r"\b(function|def|func)\s+([A-Za-z0-9_]+)\s*\(", 2),
        LanguageRule::new(Class, r"\b(class)\s+([A-Za-z0-9_]+)", 2),
    ]
});

/// Rules for a language, falling back to the generic set
pub fn rules_for(language: Language) -> &'static [LanguageRule] {
    REGISTRY
        .get(&language)
        .map_or(GENERIC_RULES.as_slice(), Vec::as_slice)
}

/// Whether the language has its own rule set
pub fn has_dedicated_rules(language: Language) -> bool {
    REGISTRY.contains_key(&language)
}

fn go_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(
            Function,
            r"^func\s+([A-Za-z0-9_]+)\s*\((.*?)\)(?:\s+([^{]*))?",
            1,
        )
        .params(2)
        .returns(3),
        LanguageRule::new(
            Method,
            r"^func\s+\(\w+\s+\*?([A-Za-z0-9_]+)\)\s+([A-Za-z0-9_]+)\s*\((.*?)\)(?:\s+([^{]*))?",
            2,
        )
        .parent(1)
        .params(3)
        .returns(4),
        LanguageRule::new(Struct, r"^type\s+([A-Za-z0-9_]+)\s+struct\s*\{", 1),
        LanguageRule::new(Interface, r"^type\s+([A-Za-z0-9_]+)\s+interface\s*\{", 1),
        LanguageRule::new(
            Constant,
            r"^const\s+([A-Za-z0-9_]+)(?:\s+([A-Za-z0-9_\[\]<>.*]+))?(?:\s*=\s*(.+))?",
            1,
        )
        .value_type(2)
        .value(3),
        LanguageRule::new(
            Variable,
            r"^var\s+([A-Za-z0-9_]+)(?:\s+([A-Za-z0-9_\[\]<>.*]+))?(?:\s*=\s*(.+))?",
            1,
        )
        .value_type(2)
        .value(3),
        LanguageRule::new(Import, r"^(import)\s*\(", 1).import_block(),
        LanguageRule::new(Import, r#"^import\s+(?:([A-Za-z0-9_.]+)\s+)?"([^"]+)""#, 2).alias(1),
        LanguageRule::new(Package, r"^package\s+([A-Za-z0-9_]+)", 1),
    ]
}

fn python_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(
            Method,
            r"^\s+(?:async\s+)?def\s+([A-Za-z0-9_]+)\s*\((?:self|cls)(?:\s*,\s*(.*?))?\)(?:\s*->\s*([A-Za-z0-9_\[\],\s.]+))?:",
            1,
        )
        .raw_line()
        .params(2)
        .returns(3),
        LanguageRule::new(
            Function,
            r"^(?:async\s+)?def\s+([A-Za-z0-9_]+)\s*\((.*?)\)(?:\s*->\s*([A-Za-z0-9_\[\],\s.]+))?:",
            1,
        )
        .params(2)
        .returns(3),
        // Base classes are reported as parameters.
        LanguageRule::new(Class, r"^class\s+([A-Za-z0-9_]+)(?:\((.*?)\))?:", 1).params(2),
        LanguageRule::new(Import, r"^(?:from\s+([A-Za-z0-9_.]+)\s+)?import\s+(.+)", 2).parent(1),
        LanguageRule::new(
            Variable,
            r"^([A-Z_][A-Z0-9_]*)\s*(?::\s*([^=]+?)\s*)?=\s*(.+)",
            1,
        )
        .value_type(2)
        .value(3),
    ]
}

fn java_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Package, r"^package\s+([A-Za-z0-9_.]+)\s*;", 1),
        LanguageRule::new(Import, r"^import\s+(?:static\s+)?([A-Za-z0-9_.*]+)\s*;", 1),
        LanguageRule::new(
            Class,
            r"(?:^|\b(public|private|protected)?\s+)class\s+([A-Za-z0-9_]+)",
            2,
        )
        .scope(1),
        LanguageRule::new(
            Method,
            r"\b(public|private|protected)?\s+[A-Za-z0-9_<>]+\s+([A-Za-z0-9_]+)\s*\(",
            2,
        )
        .scope(1),
        LanguageRule::new(
            Interface,
            r"(?:^|\b(public|private|protected)?\s+)interface\s+([A-Za-z0-9_]+)",
            2,
        )
        .scope(1),
    ]
}

fn javascript_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Function, r"function\s+([A-Za-z0-9_]+)\s*\(([^)]*)\)?", 1).params(2),
        LanguageRule::new(Variable, r"(const|let|var)\s+([A-Za-z0-9_]+)\s*=\s*(.*)", 2).value(3),
        LanguageRule::new(Class, r"class\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Method, r"\b([A-Za-z0-9_]+)\s*\(\)\s*\{", 1),
    ]
}

fn typescript_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(
            Function,
            r"function\s+([A-Za-z0-9_]+)\s*(?:<[^(]*>)?\s*\(([^)]*)\)?(?:\s*:\s*([A-Za-z0-9_<>\[\]|. ]+))?",
            1,
        )
        .params(2)
        .returns(3),
        LanguageRule::new(
            Variable,
            r"(const|let|var)\s+([A-Za-z0-9_]+)\s*:\s*([^=;]*)(?:=\s*(.+?))?\s*;?$",
            2,
        )
        .value_type(3)
        .value(4),
        LanguageRule::new(Class, r"class\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Interface, r"interface\s+([A-Za-z0-9_]+)", 1),
    ]
}

fn c_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Function, r"^[A-Za-z0-9_]+\s+([A-Za-z0-9_]+)\s*\(", 1),
        LanguageRule::new(Struct, r"struct\s+([A-Za-z0-9_]+)\s*\{", 1),
        LanguageRule::new(Define, r"#define\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Import, r#"^#include\s*[<"]([^>"]+)[>"]"#, 1),
    ]
}

fn cpp_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Function, r"^[A-Za-z0-9_:<>]+\s+([A-Za-z0-9_]+)\s*\(", 1),
        LanguageRule::new(Class, r"class\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Struct, r"struct\s+([A-Za-z0-9_]+)\s*\{", 1),
        LanguageRule::new(Namespace, r"namespace\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Define, r"#define\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Import, r#"^#include\s*[<"]([^>"]+)[>"]"#, 1),
    ]
}

fn csharp_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Import, r"^using\s+([A-Za-z0-9_.]+)\s*;", 1),
        LanguageRule::new(
            Class,
            r"(?:^|\b(public|private|protected|internal)?\s+)class\s+([A-Za-z0-9_]+)",
            2,
        )
        .scope(1),
        LanguageRule::new(
            Method,
            r"\b(public|private|protected|internal)?\s+[A-Za-z0-9_<>]+\s+([A-Za-z0-9_]+)\s*\(",
            2,
        )
        .scope(1),
        LanguageRule::new(
            Interface,
            r"(?:^|\b(public|private|protected|internal)?\s+)interface\s+([A-Za-z0-9_]+)",
            2,
        )
        .scope(1),
        LanguageRule::new(Namespace, r"namespace\s+([A-Za-z0-9_.]+)", 1),
    ]
}

fn ruby_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(Class, r"^class\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Function, r"^\s*def\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Module, r"^module\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Import, r#"^require(?:_relative)?\s+['"]([^'"]+)['"]"#, 1),
    ]
}

fn php_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        // Scoped methods first, otherwise the plain function rule claims them.
        LanguageRule::new(
            Method,
            r"\b(public|private|protected)?\s+function\s+([A-Za-z0-9_]+)\s*\(",
            2,
        )
        .scope(1),
        LanguageRule::new(Class, r"class\s+([A-Za-z0-9_]+)", 1),
        LanguageRule::new(Function, r"function\s+([A-Za-z0-9_]+)\s*\(", 1),
    ]
}

const RUST_VIS: &str = r"(?:(pub(?:\([^)]*\))?)\s+)?";

fn rust_rules() -> Vec<LanguageRule> {
    use HeaderKind::*;
    vec![
        LanguageRule::new(
            Method,
            &format!(
                r"^\s+{RUST_VIS}(?:(?:const|async|unsafe)\s+)*fn\s+([A-Za-z0-9_]+)\s*(?:<.*?>)?\s*\(((?:&(?:'\w+\s+)?)?(?:mut\s+)?self\b.*?)\)(?:\s*->\s*([^{{;]+))?"
            ),
            2,
        )
        .raw_line()
        .scope(1)
        .params(3)
        .returns(4),
        LanguageRule::new(
            Function,
            &format!(
                r"^{RUST_VIS}(?:(?:const|async|unsafe)\s+)*fn\s+([A-Za-z0-9_]+)\s*(?:<.*?>)?\s*\((.*?)\)(?:\s*->\s*([^{{;]+))?"
            ),
            2,
        )
        .scope(1)
        .params(3)
        .returns(4),
        LanguageRule::new(
            Struct,
            &format!(r"^{RUST_VIS}struct\s+([A-Za-z0-9_]+)(?:<[^{{]*>)?\s*\{{"),
            2,
        )
        .scope(1),
        LanguageRule::new(Enum, &format!(r"^{RUST_VIS}enum\s+([A-Za-z0-9_]+)"), 2).scope(1),
        LanguageRule::new(
            Interface,
            &format!(r"^{RUST_VIS}(?:unsafe\s+)?trait\s+([A-Za-z0-9_]+)"),
            2,
        )
        .scope(1),
        LanguageRule::new(
            Constant,
            &format!(r"^{RUST_VIS}(?:const|static)\s+(?:mut\s+)?([A-Z0-9_]+)\s*:\s*([^=]+?)\s*=\s*(.+?);?$"),
            2,
        )
        .scope(1)
        .value_type(3)
        .value(4),
        LanguageRule::new(Import, r"^(?:pub(?:\([^)]*\))?\s+)?use\s+(.+?);?$", 1),
        LanguageRule::new(Module, &format!(r"^{RUST_VIS}mod\s+([A-Za-z0-9_]+)"), 2).scope(1),
    ]
}
