use crate::error::{FinderError, Result};
use codeclip_scanner::Language;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// A file read into memory with its detected language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContent {
    pub path: PathBuf,
    pub content: String,
    pub language: Language,
}

impl FileContent {
    /// Read a file; invalid UTF-8 is replaced
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| FinderError::io(path, err))?;
        Ok(Self {
            path: path.to_path_buf(),
            content: String::from_utf8_lossy(&bytes).into_owned(),
            language: Language::from_path(path),
        })
    }

    /// Fenced markdown block: opening fence carries language and file name
    fn write_markdown(&self, out: &mut String) {
        let _ = writeln!(out, "```{} filename={}", self.language, self.path.display());
        out.push_str(&self.content);
        out.push_str("\n```\n\n");
    }
}

/// Read every path in order, stopping at the first failure
pub fn read_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<FileContent>> {
    paths.iter().map(FileContent::read).collect()
}

/// Concatenate the fenced blocks of all files
#[must_use]
pub fn format_files(files: &[FileContent]) -> String {
    let mut out = String::new();
    for file in files {
        file.write_markdown(&mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn reads_and_formats_in_order() {
        let dir = TempDir::new().unwrap();
        let go = dir.path().join("main.go");
        let py = dir.path().join("tool.py");
        std::fs::write(&go, "package main").unwrap();
        std::fs::write(&py, "print(1)\n").unwrap();

        let files = read_files(&[&go, &py]).unwrap();
        assert_eq!(files[0].language, Language::Go);
        assert_eq!(files[1].language, Language::Python);

        assert_eq!(
            format_files(&files),
            format!(
                "```go filename={}\npackage main\n```\n\n```python filename={}\nprint(1)\n\n```\n\n",
                go.display(),
                py.display()
            )
        );
    }

    #[test]
    fn missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = read_files(&[dir.path().join("gone.txt")]).unwrap_err();
        assert!(matches!(err, FinderError::Io { .. }));
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_list_formats_to_nothing() {
        assert_eq!(format_files(&[]), "");
        assert!(read_files::<&str>(&[]).unwrap().is_empty());
    }
}
