//! Core solver traits

use crate::error::{ParseError, SolveError};

/// Trait for parsing puzzle input into the data shared by all parts
///
/// The generic associated type lets a solver either own its parsed data or
/// borrow straight from the input string.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError};
///
/// struct Day9;
///
/// impl AocParser for Day9 {
///     type SharedData<'a> = Vec<Vec<i64>>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|line| {
///                 line.split_whitespace()
///                     .map(|n| n.parse().map_err(|_| ParseError::InvalidFormat(n.into())))
///                     .collect::<Result<Vec<i64>, _>>()
///             })
///             .collect()
///     }
/// }
///
/// let parsed = Day9::parse("0 3 6\n1 3 6").unwrap();
/// assert_eq!(parsed[1], vec![1, 3, 6]);
/// ```
pub trait AocParser {
    /// The shared data structure that holds parsed input and intermediate results.
    ///
    /// Use any ownership strategy:
    /// - `Vec<T>` or custom structs for owned data (simplest, supports mutation)
    /// - `Vec<&'a str>` or other borrowed views for zero-copy parsing
    type SharedData<'a>;

    /// Parse the input string into the shared data structure.
    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError>;
}

/// Trait for solving one part of a puzzle.
///
/// The const generic `N` is the part number, so a missing part is a
/// compile-time error once `#[derive(AocSolver)]` wires the dispatch.
pub trait PartSolver<const N: u8>: AocParser {
    /// Solve this part of the puzzle.
    ///
    /// # Arguments
    /// * `shared` - Mutable reference to shared data
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError)` - An error occurred while solving
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError>;
}

/// Core trait that all solvers implement.
///
/// Usually derived with `#[derive(AocSolver)]`, which dispatches
/// `solve_part(shared, n)` to `<Self as PartSolver<n>>::solve(shared)`.
///
/// # Example
///
/// ```
/// use aoc_solver::{AocParser, ParseError, SolveError, Solver};
///
/// struct Totals;
///
/// impl AocParser for Totals {
///     type SharedData<'a> = Vec<u32>;
///
///     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
///         input
///             .lines()
///             .map(|l| l.parse().map_err(|_| ParseError::InvalidFormat(l.into())))
///             .collect()
///     }
/// }
///
/// impl Solver for Totals {
///     const PARTS: u8 = 2;
///
///     fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError> {
///         match part {
///             1 => Ok(shared.iter().sum::<u32>().to_string()),
///             2 => Ok(shared.iter().max().copied().unwrap_or_default().to_string()),
///             _ => Err(SolveError::PartNotImplemented(part)),
///         }
///     }
/// }
///
/// let mut data = Totals::parse("3\n9\n4").unwrap();
/// assert_eq!(Totals::solve_part(&mut data, 1).unwrap(), "16");
/// assert_eq!(Totals::solve_part(&mut data, 2).unwrap(), "9");
/// ```
pub trait Solver: AocParser {
    /// Number of parts this solver implements
    const PARTS: u8;

    /// Solve a specific part of the problem
    ///
    /// # Returns
    /// * `Ok(String)` - The answer for this part
    /// * `Err(SolveError::PartNotImplemented)` - The part is not implemented
    /// * `Err(SolveError::SolveFailed)` - An error occurred while solving
    fn solve_part(shared: &mut Self::SharedData<'_>, part: u8) -> Result<String, SolveError>;
}

pub trait SolverExt: Solver {
    fn solve_part_checked_range(
        shared: &mut Self::SharedData<'_>,
        part: u8,
    ) -> Result<String, SolveError> {
        if (1..=Self::PARTS).contains(&part) {
            Self::solve_part(shared, part)
        } else {
            Err(SolveError::PartOutOfRange(part))
        }
    }
}

impl<T: Solver + ?Sized> SolverExt for T {}
