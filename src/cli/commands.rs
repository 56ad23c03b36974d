//! Command implementations for the gridfind CLI.

use std::fs;
use std::time::Instant;

use log::{debug, info};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::error::Result;
use crate::search::SearchEngine;

/// Execute a CLI command.
pub fn execute_command(args: GridFindArgs) -> Result<()> {
    match &args.command {
        Command::Find(find_args) => find_words(find_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Read a list given inline or as `@path`.
///
/// Entries are separated by commas or newlines; surrounding whitespace and
/// empty entries are dropped.
pub fn load_entries(source: &str) -> Result<Vec<String>> {
    let text = match source.strip_prefix('@') {
        Some(path) => {
            debug!("Reading entries from {path}");
            fs::read_to_string(path)?
        }
        None => source.to_string(),
    };

    Ok(text
        .split([',', '\n'])
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect())
}

/// Rank the query words found in a grid.
fn find_words(args: &FindArgs, cli_args: &GridFindArgs) -> Result<()> {
    let rows = load_entries(&args.grid)?;
    let words = load_entries(&args.words)?;
    let options = args.find_options();

    info!(
        "Searching {} rows for {} words ({:?}, {} workers)",
        rows.len(),
        words.len(),
        options.mode,
        options.worker_count
    );

    let engine = SearchEngine::new(&rows)?;

    let start_time = Instant::now();
    let ranked = engine.find_ranked(&words, &options)?;
    let duration = start_time.elapsed();
    let metrics = engine.metrics();

    output_result(
        "Most frequent matches",
        &FindReport {
            words: ranked,
            queries_evaluated: metrics.queries_evaluated,
            matches: metrics.matches,
            duration_ms: duration.as_millis() as u64,
            show_counts: args.counts,
        },
        cli_args,
    )
}

/// Show grid and index statistics.
fn show_stats(args: &StatsArgs, cli_args: &GridFindArgs) -> Result<()> {
    let rows = load_entries(&args.grid)?;

    let start_time = Instant::now();
    let engine = SearchEngine::new(&rows)?;
    let duration = start_time.elapsed();

    let grid = engine.grid();
    let index = engine.index();

    output_result(
        "Grid statistics",
        &GridStats {
            rows: grid.height(),
            columns: grid.width(),
            indexed_suffixes: index.inserted_sequences(),
            distinct_prefixes: index.node_count(),
            build_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}
