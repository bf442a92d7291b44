use crate::error::{FinderError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into unless the exclude list is replaced
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[".git", ".hg", ".svn", "node_modules", "target"];

/// Glob used when looking for "all code files"
pub const CODE_FILE_GLOB: &str =
    "**/*.{go,rs,js,ts,py,java,c,cpp,h,hpp,cs,rb,php,pl,sh,html,css,md,json,yaml,yml}";

/// Finds files under a base directory by glob
#[derive(Debug, Clone)]
pub struct FileFinder {
    base: PathBuf,
    exclude_dirs: Vec<String>,
}

impl FileFinder {
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            base: base.as_ref().to_path_buf(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|dir| (*dir).to_string()).collect(),
        }
    }

    /// Replace the excluded directory names
    #[must_use]
    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Files whose path relative to the base matches `pattern`.
    ///
    /// Supports `**`, `{a,b}` alternation and character classes; `*` does not
    /// cross `/`. Results are sorted by walk order (file name within each
    /// directory) and include the base prefix.
    pub fn find(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let matcher = compile_glob(pattern)?;

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.base)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded(entry));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.base) else {
                continue;
            };
            if matcher.is_match(relative) {
                files.push(entry.into_path());
            }
        }

        log::debug!(
            "Glob {pattern:?} matched {} files under {}",
            files.len(),
            self.base.display()
        );
        Ok(files)
    }

    /// All files with a known source extension
    pub fn find_code_files(&self) -> Result<Vec<PathBuf>> {
        self.find(CODE_FILE_GLOB)
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        let excluded = self.exclude_dirs.iter().any(|dir| *dir == name);
        if excluded {
            log::debug!("Skipping excluded directory {}", entry.path().display());
        }
        excluded
    }
}

/// Whether `text` contains glob metacharacters
pub fn is_glob(text: &str) -> bool {
    text.contains(['*', '?', '[', ']', '{', '}'])
}

fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|err| FinderError::glob(pattern, err))
}
