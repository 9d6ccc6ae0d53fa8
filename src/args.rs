use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DictionaryMode;

/// Class dictionary CLI - Composes Tailwind class strings from JSON class values
#[derive(Parser, Debug)]
#[command(name = "class-dict")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(
        short = 'v',
        long = "verbose",
        global = true,
        default_value_t = false,
        help = "Enable debug logging on stderr"
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Flatten class values from stdin into ordered tokens
    Collect(CollectArgs),
    /// Flatten class values from stdin and resolve utility conflicts
    Merge(MergeArgs),
}

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct ComposeOptions {
    /// Configuration file path (YAML or JSON)
    #[arg(
        short = 'c',
        long = "config",
        value_name = "PATH",
        help = "Path to configuration file (YAML or JSON format)"
    )]
    pub config: Option<PathBuf>,

    /// Dictionary semantics
    #[arg(
        short = 'm',
        long = "mode",
        value_enum,
        help = "How dictionary entries are interpreted (overrides the config file)"
    )]
    pub mode: Option<DictionaryMode>,

    /// Keep multi-class keys as one token
    #[arg(
        long = "no-split-keys",
        default_value_t = false,
        help = "Emit dictionary keys as single tokens instead of splitting on whitespace"
    )]
    pub no_split_keys: bool,

    /// Disable conflict resolution
    #[arg(
        long = "no-merge",
        default_value_t = false,
        help = "Join tokens without resolving utility conflicts"
    )]
    pub no_merge: bool,
}

/// Arguments for the collect command
#[derive(Parser, Debug, Clone)]
pub struct CollectArgs {
    #[command(flatten)]
    pub options: ComposeOptions,

    /// Print tokens as a JSON array
    #[arg(
        long = "json",
        default_value_t = false,
        help = "Print tokens as a JSON array instead of one per line"
    )]
    pub json: bool,
}

/// Arguments for the merge command
#[derive(Parser, Debug, Clone)]
pub struct MergeArgs {
    #[command(flatten)]
    pub options: ComposeOptions,

    /// Treat every input line as a separate document
    #[arg(
        short = 'l',
        long = "lines",
        default_value_t = false,
        help = "Merge each non-empty input line independently (processed in parallel)"
    )]
    pub lines: bool,

    /// Print a JSON report instead of the merged string
    #[arg(
        short = 'r',
        long = "report",
        default_value_t = false,
        help = "Print a JSON report with tokens, merged string and overridden classes"
    )]
    pub report: bool,
}

impl MergeArgs {
    /// Validate that the arguments are consistent
    pub fn validate(&self) -> Result<(), String> {
        if self.lines && self.report {
            return Err("--report cannot be combined with --lines".to_string());
        }

        Ok(())
    }
}
