use anyhow::{Context, Result};
use clap::Args;
use codeclip_finder::{format_files, is_glob, read_files};
use codeclip_scanner::{format_headers, HeaderElement, HeaderExtractor};
use codeclip_search::{format_search_results, SnippetSearcher};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::stats::Stats;
use crate::template::TemplateProcessor;

#[derive(Args, Debug)]
pub struct GlobArgs {
    /// Glob relative to --path, e.g. "src/**/*.{rs,toml}"
    pub pattern: String,
}

#[derive(Args, Debug)]
pub struct HeadersArgs {
    /// A single file, or a glob relative to --path
    pub target: String,

    /// Emit headers as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Regular expression (or subsequence with --fuzzy)
    pub pattern: String,

    /// Emit the search result as JSON instead of markdown
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Template file containing {{file}} / {{glob}} tags
    pub template: PathBuf,
}

#[derive(Serialize)]
struct FileHeaders<'a> {
    path: &'a Path,
    headers: &'a [HeaderElement],
}

pub fn run_glob(settings: &Settings, args: &GlobArgs) -> Result<()> {
    let paths = settings
        .finder()
        .find(&args.pattern)
        .context("failed to find files")?;
    let files = read_files(&paths)?;
    deliver(settings, &format_files(&files), files.len())
}

pub fn run_headers(settings: &Settings, args: &HeadersArgs) -> Result<()> {
    let paths = if !is_glob(&args.target) && Path::new(&args.target).exists() {
        vec![PathBuf::from(&args.target)]
    } else {
        settings
            .finder()
            .find(&args.target)
            .context("failed to find files")?
    };
    if paths.is_empty() {
        anyhow::bail!("no files found matching pattern: {}", args.target);
    }

    let extractor = HeaderExtractor::new();
    let mut extracted = Vec::with_capacity(paths.len());
    for path in &paths {
        let headers = extractor
            .extract_file(path)
            .with_context(|| format!("failed to collect headers from {}", path.display()))?;
        extracted.push((path, headers));
    }

    if args.json {
        let files: Vec<FileHeaders<'_>> = extracted
            .iter()
            .map(|(path, headers)| FileHeaders {
                path: path.as_path(),
                headers,
            })
            .collect();
        return settings.output.write(&serde_json::to_string_pretty(&files)?);
    }

    let mut out = String::from("# Code Structure Headers\n\n");
    for (path, headers) in &extracted {
        if headers.is_empty() {
            continue;
        }
        let _ = write!(
            out,
            "## {}\n\n```\n{}```\n\n",
            path.display(),
            format_headers(headers)
        );
    }
    deliver(settings, &out, paths.len())
}

pub fn run_search(settings: &Settings, args: &SearchArgs) -> Result<()> {
    let files = settings.finder().find_code_files()?;
    let searcher = SnippetSearcher::new(&args.pattern, settings.search_options())?;
    let result = searcher.search_files(&files)?;
    log::debug!(
        "Pattern {:?} matched {} snippets in {} of {} files",
        args.pattern,
        result.snippet_count(),
        result.files.len(),
        files.len()
    );

    if args.json {
        return settings.output.write(&serde_json::to_string_pretty(&result)?);
    }
    deliver(settings, &format_search_results(&result), result.files.len())
}

pub fn run_template(settings: &Settings, args: &TemplateArgs) -> Result<()> {
    let processed = TemplateProcessor::new(settings.finder()).process(&args.template)?;
    deliver(settings, &processed, 1)
}

/// Enforce the token limit, write the output and print the summary
fn deliver(settings: &Settings, content: &str, files: usize) -> Result<()> {
    let stats = Stats::from_content(content, files);
    settings.check_token_limit(stats.tokens)?;
    settings.output.write(content)?;
    if settings.estimate {
        eprint!("{}", stats.summary());
    }
    Ok(())
}
