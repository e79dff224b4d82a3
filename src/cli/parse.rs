//! CLI parse: clap types for hyphae. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hyphae CLI - inspect a file-backed hypha store
#[derive(Parser)]
#[command(name = "hyphae")]
#[command(about = "Scan a wiki directory tree and query its hyphae and revisions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Wiki root directory
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false", conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Scan the wiki root and summarize the index
    Scan {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List every hypha
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show one revision of a hypha
    Show {
        /// Full hypha name, e.g. "recipes/bread"
        hypha: String,
        /// Revision id (default: newest revision)
        #[arg(long)]
        rev: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the text payload of a revision
    Raw {
        /// Full hypha name
        hypha: String,
        /// Revision id (default: newest revision)
        #[arg(long)]
        rev: Option<String>,
    },
}
