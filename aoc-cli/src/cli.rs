//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// Advent of Code solver runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solvers", version)]
pub struct Args {
    /// Year to run (runs all years if omitted)
    #[arg(short, long)]
    pub year: Option<u16>,

    /// Day to run (runs all days if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    /// Part to run (runs all parts if omitted)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Tags to filter solvers (comma-separated, all must match)
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Directory holding puzzle inputs as `{year}/day{day:02}.txt`
    #[arg(long, default_value = "inputs")]
    pub input_dir: PathBuf,

    /// Read the puzzle input from this file instead of the input directory
    #[arg(short, long, requires_all = ["year", "day"])]
    pub input: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(long)]
    pub debug: bool,

    /// Quiet mode - only output answers
    #[arg(short, long)]
    pub quiet: bool,
}
