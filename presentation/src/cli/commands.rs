//! CLI command definitions

use clap::{Parser, ValueEnum};
use moderation_domain::ModerationAction;
use std::path::PathBuf;

/// Summary output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    Text,
    /// JSON array of moderation results
    Json,
}

impl From<OutputFormat> for moderation_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => moderation_domain::OutputFormat::Text,
            OutputFormat::Json => moderation_domain::OutputFormat::Json,
        }
    }
}

/// Which classification oracle to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleChoice {
    /// OpenAI-compatible chat completions endpoint
    Openai,
    /// Canned assessments from the content fixture (offline)
    Fixture,
}

/// Where flagged items are reviewed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReviewMode {
    /// Interactive prompt on the terminal
    #[default]
    Console,
    /// One JSON ticket per line on stdout, one reply per line on stdin
    JsonLines,
}

/// CLI arguments for content-moderation
#[derive(Parser, Debug)]
#[command(name = "content-moderation")]
#[command(author, version, about = "AI-assisted content moderation with a human in the loop")]
#[command(long_about = r#"
Content Moderation classifies user content with an LLM and routes anything
that looks like a policy violation to a human moderator.

For each item:
1. Classify: the oracle returns category, severity, confidence and a recommendation
2. Decide: content with no violation is approved automatically
3. Review: everything else waits for a moderator's action
   (approve / warn / restrict / remove)

A summary of every decision is printed at the end.

Configuration files are loaded from (in priority order):
1. MODERATION_* environment variables
2. --config <path>          Explicit config file
3. ./moderation.toml        Project-level config
4. ~/.config/content-moderation/config.toml   Global config

Example:
  content-moderation --oracle fixture
  content-moderation --content posts.toml --moderator "Alex"
  content-moderation --oracle fixture --auto remove -o json
  content-moderation --review json-lines < replies.txt
"#)]
pub struct Cli {
    /// Content fixture file (.toml or .json); defaults to built-in sample posts
    #[arg(long, value_name = "PATH")]
    pub content: Option<PathBuf>,

    /// Classification oracle (overrides oracle.provider)
    #[arg(long, value_enum, value_name = "ORACLE")]
    pub oracle: Option<OracleChoice>,

    /// Model used for classification (overrides oracle.model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Moderator name recorded on human decisions (overrides review.moderator_name)
    #[arg(long, value_name = "NAME")]
    pub moderator: Option<String>,

    /// How flagged items reach a moderator
    #[arg(long, value_enum, value_name = "MODE", default_value_t = ReviewMode::Console)]
    pub review: ReviewMode,

    /// Answer every review with ACTION instead of prompting
    #[arg(long, value_name = "ACTION", value_parser = parse_action, conflicts_with = "review")]
    pub auto: Option<ModerationAction>,

    /// Summary output format (overrides output.format)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show the effective configuration and its sources, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_action(value: &str) -> Result<ModerationAction, String> {
    value.parse::<ModerationAction>().map_err(|_| {
        format!(
            "'{}' is not an action ({})",
            value,
            ModerationAction::vocabulary()
        )
    })
}
