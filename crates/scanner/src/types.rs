use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of structural element found in a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderKind {
    Function,
    Method,
    Class,
    Interface,
    Variable,
    Constant,
    Import,
    Field,
    Enum,
    Struct,
    Package,
    Namespace,
    Module,
    Define,
}

impl HeaderKind {
    /// Get human-readable name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "Function",
            Self::Method => "Method",
            Self::Class => "Class",
            Self::Interface => "Interface",
            Self::Variable => "Variable",
            Self::Constant => "Constant",
            Self::Import => "Import",
            Self::Field => "Field",
            Self::Enum => "Enum",
            Self::Struct => "Struct",
            Self::Package => "Package",
            Self::Namespace => "Namespace",
            Self::Module => "Module",
            Self::Define => "Define",
        }
    }

    /// Struct and class declarations get a member scan
    #[must_use]
    pub const fn has_members(self) -> bool {
        matches!(self, Self::Struct | Self::Class)
    }

    /// Functions and methods carry parameters and return types
    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Method)
    }
}

impl fmt::Display for HeaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single parameter of a function or method.
///
/// Either side may be empty: Go allows unnamed parameters, dynamic languages
/// have no type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// A structural element extracted from one source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderElement {
    pub kind: HeaderKind,

    pub name: String,

    /// Line of the declaration (1-indexed)
    pub line: usize,

    /// Raw signature text, the trimmed source line unless a rule captures it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Visibility keyword (public, private, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Owning class/struct for methods, `from` module for Python imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Import alias (`import numpy as np`, Go `alias "path"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// Fields of a struct/class, entries of an import block
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<HeaderElement>,

    /// Last line of a block element (1-indexed, inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_types: Vec<String>,

    /// Declared type of a constant or variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    /// Literal value of a constant or variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl HeaderElement {
    /// Create an element with only kind, name and line set
    pub fn new(kind: HeaderKind, name: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            name: name.into(),
            line,
            signature: None,
            scope: None,
            parent: None,
            alias: None,
            children: Vec::new(),
            end_line: None,
            parameters: Vec::new(),
            return_types: Vec::new(),
            value_type: None,
            value: None,
        }
    }

    /// Builder: set parent
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Builder: set import alias
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Builder: set scope
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// `Parent.name` for members, plain name otherwise
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{parent}.{}", self.name),
            None => self.name.clone(),
        }
    }
}
