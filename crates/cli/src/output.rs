use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Platform clipboard commands, tried in order
const CLIPBOARD_COMMANDS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Where rendered output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Clipboard,
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `clipboard`, `stdout`, or anything else as a file path
    pub fn parse(value: &str) -> Self {
        match value {
            "clipboard" => Self::Clipboard,
            "stdout" => Self::Stdout,
            path => Self::File(PathBuf::from(path)),
        }
    }

    pub fn write(&self, content: &str) -> Result<()> {
        match self {
            Self::Clipboard => {
                if copy_to_clipboard(content) {
                    return Ok(());
                }
                log::warn!("No clipboard utility available, writing to stdout");
                write_stdout(content)
            }
            Self::Stdout => write_stdout(content),
            Self::File(path) => fs::write(path, content)
                .with_context(|| format!("failed to write output to {}", path.display())),
        }
    }
}

fn write_stdout(content: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn copy_to_clipboard(content: &str) -> bool {
    CLIPBOARD_COMMANDS
        .iter()
        .any(|(program, args)| match pipe_into(program, args, content) {
            Ok(()) => {
                log::debug!("Copied {} bytes with {program}", content.len());
                true
            }
            Err(err) => {
                log::debug!("Clipboard command {program} unavailable: {err}");
                false
            }
        })
}

fn pipe_into(program: &str, args: &[&str], content: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(content.as_bytes())?;
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_targets() {
        assert_eq!(OutputTarget::parse("clipboard"), OutputTarget::Clipboard);
        assert_eq!(OutputTarget::parse("stdout"), OutputTarget::Stdout);
        assert_eq!(
            OutputTarget::parse("out/context.md"),
            OutputTarget::File(PathBuf::from("out/context.md"))
        );
    }

    #[test]
    fn writes_file_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("context.md");
        OutputTarget::File(path.clone()).write("hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }

    #[test]
    fn file_target_in_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::File(dir.path().join("missing/context.md"));
        assert!(target.write("hello").is_err());
    }
}
