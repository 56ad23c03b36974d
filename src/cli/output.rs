//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{GridFindArgs, OutputFormat};
use crate::error::Result;
use crate::topk::RankedWord;

/// Result structure for find operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct FindReport {
    pub words: Vec<RankedWord>,
    pub queries_evaluated: u64,
    pub matches: u64,
    pub duration_ms: u64,
    #[serde(skip)]
    pub show_counts: bool,
}

/// Grid and index statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct GridStats {
    pub rows: usize,
    pub columns: usize,
    pub indexed_suffixes: usize,
    pub distinct_prefixes: usize,
    pub build_ms: u64,
}

/// Results that know how to print themselves for people.
pub trait HumanReport {
    fn print_human(&self, args: &GridFindArgs);
}

impl HumanReport for FindReport {
    fn print_human(&self, args: &GridFindArgs) {
        for (i, ranked) in self.words.iter().enumerate() {
            if self.show_counts {
                println!("{:>2}. {} ({})", i + 1, ranked.word, ranked.count);
            } else {
                println!("{}", ranked.word);
            }
        }

        if args.verbosity() > 1 {
            println!();
            println!(
                "Evaluated {} words, {} matched, in {}ms",
                self.queries_evaluated, self.matches, self.duration_ms
            );
        }
    }
}

impl HumanReport for GridStats {
    fn print_human(&self, _args: &GridFindArgs) {
        println!("Grid Statistics:");
        println!("════════════════");
        println!("Rows: {}", self.rows);
        println!("Columns: {}", self.columns);
        println!("Indexed suffixes: {}", self.indexed_suffixes);
        println!("Distinct prefixes: {}", self.distinct_prefixes);
        println!("Build time: {}ms", self.build_ms);
    }
}

/// Output a result in the specified format.
pub fn output_result<T>(message: &str, result: &T, args: &GridFindArgs) -> Result<()>
where
    T: Serialize + HumanReport,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                println!("{message}");
                println!();
            }
            result.print_human(args);
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &GridFindArgs) -> Result<()> {
    println!("{}", render_json(result, args.pretty)?);
    Ok(())
}

/// Render a result as JSON text.
pub fn render_json<T: Serialize>(result: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
