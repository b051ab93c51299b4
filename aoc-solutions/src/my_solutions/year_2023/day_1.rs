use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 1, tags = ["strings"])]
pub struct Solver;

const SPELLED_DIGITS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

impl AocParser for Solver {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        let lines: Vec<&str> = input
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            return Err(ParseError::MissingData("no calibration lines".to_string()));
        }
        Ok(lines)
    }
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, false).map(|sum| sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        calibration_sum(shared, true).map(|sum| sum.to_string())
    }
}

fn calibration_sum(lines: &[&str], spelled: bool) -> Result<u32, SolveError> {
    lines
        .iter()
        .enumerate()
        .map(|(idx, line)| calibration_value(line, spelled).ok_or_else(|| {
            SolveError::failed(format!("(line {}) no digit in {:?}", idx + 1, line))
        }))
        .sum()
}

/// First and last digit of `line` read as a two-digit number.
///
/// Spelled digits may share letters (`eightwo` is 8 then 2), so every byte
/// offset is tried as a start.
fn calibration_value(line: &str, spelled: bool) -> Option<u32> {
    let first = (0..line.len()).find_map(|idx| digit_at(line, idx, spelled))?;
    let last = (0..line.len()).rev().find_map(|idx| digit_at(line, idx, spelled))?;
    tracing::trace!(line, first, last, "calibration value");
    Some(first * 10 + last)
}

fn digit_at(line: &str, idx: usize, spelled: bool) -> Option<u32> {
    let rest = &line.as_bytes()[idx..];
    match rest.first() {
        Some(byte) if byte.is_ascii_digit() => Some(u32::from(byte - b'0')),
        Some(_) if spelled => SPELLED_DIGITS
            .iter()
            .position(|word| rest.starts_with(word.as_bytes()))
            .map(|pos| pos as u32 + 1),
        _ => None,
    }
}
