use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod output;
mod stats;
mod template;

use config::{FileConfig, Settings};

#[derive(Parser)]
#[command(name = "codeclip")]
#[command(about = "Collect code context for LLM prompts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Flags shared by every subcommand. Unset values fall back to the config
/// file, then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Lines of context around each search match [default: 3]
    #[arg(short, long, global = true)]
    pub context: Option<usize>,

    /// Return the entire enclosing function for each match
    #[arg(short, long, global = true)]
    pub function: bool,

    /// Case-insensitive subsequence matching
    #[arg(short = 'z', long, global = true)]
    pub fuzzy: bool,

    /// Output target: clipboard, stdout or a file path [default: clipboard]
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Print the size summary to stderr (--estimate=false to disable)
    #[arg(
        short,
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub estimate: Option<bool>,

    /// Reject output above this many estimated tokens (0 = unlimited)
    #[arg(short, long, global = true)]
    pub max_tokens: Option<usize>,

    /// Base directory for file discovery [default: .]
    #[arg(short, long, global = true)]
    pub path: Option<PathBuf>,

    /// Config file (defaults to ./.codeclip.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: log only errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy every file matching a glob
    Glob(commands::GlobArgs),

    /// Extract structural headers (functions, types, imports) from files
    Headers(commands::HeadersArgs),

    /// Search code files and copy the matching snippets
    Search(commands::SearchArgs),

    /// Expand {{file}} and {{glob}} tags in a template
    Template(commands::TemplateArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.global.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.global.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let file_config = FileConfig::load(cli.global.config.as_deref())?;
    let settings = Settings::resolve(&cli.global, file_config);
    log::debug!("Effective settings: {settings:?}");

    match cli.command {
        Commands::Glob(args) => commands::run_glob(&settings, &args)?,
        Commands::Headers(args) => commands::run_headers(&settings, &args)?,
        Commands::Search(args) => commands::run_search(&settings, &args)?,
        Commands::Template(args) => commands::run_template(&settings, &args)?,
    }

    Ok(())
}
