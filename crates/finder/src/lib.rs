//! # Codeclip Finder
//!
//! Walks a directory tree, selects files by glob (matched against the path
//! relative to the base directory) and renders file contents as fenced
//! markdown blocks.

mod content;
mod error;
mod finder;

pub use content::{format_files, read_files, FileContent};
pub use error::{FinderError, Result};
pub use finder::{is_glob, FileFinder, CODE_FILE_GLOB, DEFAULT_EXCLUDE_DIRS};
