use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::output::OutputTarget;
use crate::GlobalArgs;

/// Project-local config file, looked up in the working directory
pub const LOCAL_CONFIG: &str = ".codeclip.toml";

/// Values read from a `codeclip` TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub context_lines: Option<usize>,
    pub output: Option<String>,
    pub max_tokens: Option<usize>,
    pub path: Option<PathBuf>,
    pub estimate: Option<bool>,
    pub exclude_dirs: Option<Vec<String>>,
}

impl FileConfig {
    /// Load the config file. An explicit path must exist; the implicit
    /// locations are skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::read(path);
        }

        let candidates = [
            Some(PathBuf::from(LOCAL_CONFIG)),
            dirs::config_dir().map(|dir| dir.join("codeclip").join("config.toml")),
        ];
        for path in candidates.into_iter().flatten() {
            if path.is_file() {
                return Self::read(&path);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::parse(&text)
            .with_context(|| format!("invalid config {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Effective settings: command-line flag, then config file, then default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub context_lines: usize,
    pub whole_function: bool,
    pub fuzzy: bool,
    pub output: OutputTarget,
    pub estimate: bool,
    pub max_tokens: usize,
    pub path: PathBuf,
    pub exclude_dirs: Option<Vec<String>>,
}

impl Settings {
    pub fn resolve(args: &GlobalArgs, file: FileConfig) -> Self {
        let output = args
            .output
            .clone()
            .or(file.output)
            .unwrap_or_else(|| "clipboard".to_string());

        Self {
            context_lines: args
                .context
                .or(file.context_lines)
                .unwrap_or(codeclip_search::DEFAULT_CONTEXT_LINES),
            whole_function: args.function,
            fuzzy: args.fuzzy,
            output: OutputTarget::parse(&output),
            estimate: args.estimate.or(file.estimate).unwrap_or(true),
            max_tokens: args.max_tokens.or(file.max_tokens).unwrap_or(0),
            path: args
                .path
                .clone()
                .or(file.path)
                .unwrap_or_else(|| PathBuf::from(".")),
            exclude_dirs: file.exclude_dirs,
        }
    }

    pub fn finder(&self) -> codeclip_finder::FileFinder {
        let finder = codeclip_finder::FileFinder::new(&self.path);
        match &self.exclude_dirs {
            Some(dirs) => finder.with_exclude_dirs(dirs.iter().cloned()),
            None => finder,
        }
    }

    pub fn search_options(&self) -> codeclip_search::SearchOptions {
        codeclip_search::SearchOptions::default()
            .with_context_lines(self.context_lines)
            .with_whole_function(self.whole_function)
            .with_fuzzy(self.fuzzy)
    }

    /// Reject output above the token limit; zero disables the check
    pub fn check_token_limit(&self, tokens: usize) -> Result<()> {
        if self.max_tokens > 0 && tokens > self.max_tokens {
            anyhow::bail!("output exceeds token limit: {tokens} > {}", self.max_tokens);
        }
        Ok(())
    }
}
