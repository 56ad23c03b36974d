//! Command line argument parsing for the gridfind CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::search::config::{Aggregation, ExecutionMode, FindOptions, default_worker_count};

/// gridfind - rank the most frequent word matches in a letter grid
#[derive(Parser, Debug, Clone)]
#[command(name = "gridfind")]
#[command(about = "Rank the most frequent horizontal and vertical word matches in a letter grid")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GridFindArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GridFindArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rank the query words found in a grid
    Find(FindArgs),

    /// Show grid and index statistics
    Stats(StatsArgs),
}

/// Arguments for finding words
#[derive(Parser, Debug, Clone)]
pub struct FindArgs {
    /// Grid rows, comma-separated, or @FILE with one row per line
    #[arg(short, long, value_name = "ROWS")]
    pub grid: String,

    /// Query words, comma-separated, or @FILE with one word per line
    #[arg(short, long, value_name = "WORDS")]
    pub words: String,

    /// Execution mode
    #[arg(short, long, default_value = "sequential")]
    pub mode: ModeArg,

    /// Number of workers in pooled mode (1-10)
    #[arg(long, default_value_t = default_worker_count())]
    pub workers: usize,

    /// How pooled workers aggregate matches
    #[arg(long, default_value = "partitioned")]
    pub aggregation: AggregationArg,

    /// Maximum number of words buffered for the workers
    #[arg(long, default_value = "1024")]
    pub queue_capacity: usize,

    /// Include occurrence counts in the output
    #[arg(long)]
    pub counts: bool,
}

impl FindArgs {
    /// Build the engine options from the parsed flags.
    pub fn find_options(&self) -> FindOptions {
        FindOptions::sequential()
            .with_mode(self.mode.into())
            .with_worker_count(self.workers)
            .with_aggregation(self.aggregation.into())
            .with_queue_capacity(self.queue_capacity)
    }
}

/// Arguments for grid statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Grid rows, comma-separated, or @FILE with one row per line
    #[arg(short, long, value_name = "ROWS")]
    pub grid: String,
}

/// Execution modes available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeArg {
    /// Evaluate on the calling thread
    Sequential,
    /// Evaluate across a worker pool
    Pooled,
}

impl From<ModeArg> for ExecutionMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Sequential => ExecutionMode::Sequential,
            ModeArg::Pooled => ExecutionMode::Pooled,
        }
    }
}

/// Aggregation strategies available in CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationArg {
    /// One locked ranking shared by all workers
    Shared,
    /// Private rankings merged after the workers finish
    Partitioned,
}

impl From<AggregationArg> for Aggregation {
    fn from(aggregation: AggregationArg) -> Self {
        match aggregation {
            AggregationArg::Shared => Aggregation::Shared,
            AggregationArg::Partitioned => Aggregation::Partitioned,
        }
    }
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
