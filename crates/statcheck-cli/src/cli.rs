//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Statcheck CLI - Check statistical claims in news articles against official data.
#[derive(Debug, Parser)]
#[command(name = "statcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.statcheck/config.toml)
    #[arg(short, long, global = true, env = "STATCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Series registry TOML file (default: built-in catalogue)
    #[arg(long, global = true)]
    pub registry: Option<PathBuf>,

    /// Observation snapshot JSON file (default: built-in sample)
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per claim)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the claims in one article
    Check(CheckArgs),

    /// Check a JSON array of articles
    Batch(BatchArgs),

    /// List the series registry
    Series,

    /// Score an article's fact-check priority without checking it
    Score(ScoreArgs),

    /// Re-run a batch on a schedule
    Watch(WatchArgs),
}

/// Where an article's text comes from.
#[derive(Debug, clap::Args)]
pub struct TextInput {
    /// Article text
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// File holding the article text (stdin when neither is given)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Article title
    #[arg(long, default_value = "")]
    pub title: String,
}

/// Arguments for the check command.
#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub input: TextInput,

    /// Article URL; namespaces the claim ids
    #[arg(short, long, default_value = "stdin://article")]
    pub url: String,
}

/// Arguments for the batch command.
#[derive(Debug, Parser)]
pub struct BatchArgs {
    /// JSON file containing an array of {url, title, text}
    pub articles: PathBuf,
}

/// Arguments for the score command.
#[derive(Debug, Parser)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub input: TextInput,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// JSON file containing an array of articles; re-read every cycle
    pub articles: PathBuf,

    /// Minutes between runs (default: the configured interval)
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Stop after this many runs instead of waiting for Ctrl+C
    #[arg(long)]
    pub cycles: Option<usize>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_command() {
        let cli = Cli::parse_from(["statcheck", "check", "--text", "월세가 올랐다", "--url", "u1"]);
        match cli.command {
            Command::Check(args) => {
                assert_eq!(args.input.text.as_deref(), Some("월세가 올랐다"));
                assert_eq!(args.url, "u1");
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_text_and_file_conflict() {
        let result = Cli::try_parse_from([
            "statcheck", "check", "--text", "a", "--file", "b.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "statcheck", "batch", "articles.json", "--format", "json", "--verbose",
        ]);
        assert!(cli.verbose);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert!(matches!(cli.command, Command::Batch(_)));
    }

    #[test]
    fn test_watch_command() {
        let cli = Cli::parse_from(["statcheck", "watch", "a.json", "--interval", "5", "--cycles", "2"]);
        match cli.command {
            Command::Watch(args) => {
                assert_eq!(args.interval, Some(5));
                assert_eq!(args.cycles, Some(2));
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_format_conversion() {
        let format: crate::config::OutputFormat = CliFormat::Quiet.into();
        assert!(matches!(format, crate::config::OutputFormat::Quiet));
    }
}
