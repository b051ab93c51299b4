//! Output formatting for solver results

use crate::executor::SolverResult;
use chrono::TimeDelta;

/// Output formatter for solver results
///
/// Answers go to stdout, failures to stderr.
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Format and print a single result
    pub fn print_result(&self, result: &SolverResult) {
        match (&result.answer, self.quiet) {
            (Ok(answer), true) => println!("{}", answer),
            (Ok(_), false) => println!("{}", format_success(result)),
            (Err(e), _) => eprintln!("{}: Error - {}", result_prefix(result), e),
        }
    }

    /// Print a summary after all results
    /// Shows both total solve time (sum of durations) and actual elapsed wall-clock time
    pub fn print_summary(&self, results: &[SolverResult]) {
        if self.quiet {
            return;
        }
        println!();
        for line in summary_lines(results, self.start_time.elapsed()) {
            println!("{}", line);
        }
    }
}

fn result_prefix(result: &SolverResult) -> String {
    format!("{}/{:02} Part {}", result.year, result.day, result.part)
}

/// `YYYY/DD Part N: answer (parse: .., solve: ..)`
fn format_success(result: &SolverResult) -> String {
    let answer = result.answer.as_deref().unwrap_or_default();
    let parse_timing = result
        .parse_duration
        .map(|d| format!("parse: {}, ", format_duration(d)))
        .unwrap_or_default();
    format!(
        "{}: {} ({}solve: {})",
        result_prefix(result),
        answer,
        parse_timing,
        format_duration(result.solve_duration)
    )
}

fn summary_lines(results: &[SolverResult], elapsed: std::time::Duration) -> Vec<String> {
    let total = results.len();
    let successes = results.iter().filter(|r| r.answer.is_ok()).count();
    let failures = total - successes;

    let total_parse_time: TimeDelta = results
        .iter()
        .filter(|r| r.answer.is_ok())
        .filter_map(|r| r.parse_duration)
        .sum();
    let total_solve_time: TimeDelta = results
        .iter()
        .filter(|r| r.answer.is_ok())
        .map(|r| r.solve_duration)
        .sum();

    vec![
        "--- Summary ---".to_string(),
        format!("Solvers: {} solved, {} failed", successes, failures),
        format!("Total parse time: {}", format_duration(total_parse_time)),
        format!("Total solve time: {}", format_duration(total_solve_time)),
        format!("Elapsed wall-clock time: {}", format_std_duration(elapsed)),
    ]
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a std::time::Duration for display (used for wall-clock time)
fn format_std_duration(d: std::time::Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}
