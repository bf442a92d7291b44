//! # Codeclip Scanner
//!
//! Line-oriented extraction of structural headers (functions, methods,
//! classes, imports, constants, ...) from source files.
//!
//! There is no parser here. Each language has an ordered list of regex rules
//! (see `registry`); the first rule that matches a line produces a
//! [`HeaderElement`]. A little state rides along the scan:
//!
//! ```text
//! Source lines
//!     │
//!     ├──> skip blanks and comment lines
//!     ├──> brace depth        (import blocks only open at top level)
//!     ├──> Go import ( ... )  → one Import child per entry
//!     ├──> Python class       → parent of following methods
//!     └──> struct/class body  → Field children, end line
//! ```
//!
//! The patterns are heuristic: unusual formatting yields missed or
//! misattributed elements, never an error.
//!
//! ## Example
//!
//! ```rust
//! use codeclip_scanner::{format_headers, HeaderExtractor, HeaderKind};
//!
//! let code = "func (r *Repo) Save(id int) error {\n\treturn nil\n}\n";
//! let headers = HeaderExtractor::new().extract_str(code, Some("repo.go"));
//!
//! assert_eq!(headers[0].kind, HeaderKind::Method);
//! assert_eq!(headers[0].parent.as_deref(), Some("Repo"));
//! print!("{}", format_headers(&headers));
//! ```

mod error;
mod extractor;
mod format;
mod language;
mod params;
mod registry;
mod types;

pub use error::{Result, ScannerError};
pub use extractor::{extract_headers, HeaderExtractor};
pub use format::format_headers;
pub use language::Language;
pub use params::{parse_return_types, split_parameters, split_respecting_brackets};
pub use registry::{has_dedicated_rules, rules_for, LanguageRule, LineForm};
pub use types::{HeaderElement, HeaderKind, Parameter};
