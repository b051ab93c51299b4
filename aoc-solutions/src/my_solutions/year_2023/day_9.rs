use aoc_solver::{AocParser, ParseError, PartSolver, SolveError};
use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
use itertools::Itertools;

#[derive(AocSolver, AutoRegisterSolver)]
#[aoc_solver(max_parts = 2)]
#[aoc(year = 2023, day = 9, tags = ["sequences"])]
pub struct Solver;

impl AocParser for Solver {
    type SharedData<'a> = Vec<Vec<i64>>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(line_idx, line)| {
                line.split_whitespace()
                    .map(|n| {
                        n.parse::<i64>().map_err(|e| {
                            ParseError::InvalidFormat(format!("(line {}) {n:?}: {e}", line_idx + 1))
                        })
                    })
                    .collect::<Result<Vec<i64>, _>>()
            })
            .collect()
    }
}

/// Next value of `history`, from the sum of the last entries of every
/// difference row down to the all-zero one. `None` on `i64` overflow.
fn extrapolate(history: &[i64]) -> Option<i64> {
    let mut row = history.to_vec();
    let mut next = 0i64;
    while row.iter().any(|&v| v != 0) {
        next = next.checked_add(row.last().copied().unwrap_or_default())?;
        row = row
            .iter()
            .tuple_windows()
            .map(|(a, b)| b.checked_sub(*a))
            .collect::<Option<Vec<i64>>>()?;
    }
    Some(next)
}

/// Sum of extrapolated values, failing the part on overflow
fn sum_extrapolated(mut values: impl Iterator<Item = Option<i64>>) -> Result<i64, SolveError> {
    values
        .try_fold(0i64, |total, next| total.checked_add(next?))
        .ok_or_else(|| SolveError::failed("extrapolated value overflows i64"))
}

impl PartSolver<1> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = sum_extrapolated(shared.iter().map(|history| extrapolate(history)))?;
        Ok(sum.to_string())
    }
}

impl PartSolver<2> for Solver {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let sum = sum_extrapolated(shared.iter().map(|history| {
            let reversed = history.iter().rev().copied().collect_vec();
            extrapolate(&reversed)
        }))?;
        Ok(sum.to_string())
    }
}
