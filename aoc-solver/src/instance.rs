//! Parsed solver instances and their type-erased handle

use crate::error::{ParseError, SolveError};
use crate::solver::{Solver, SolverExt};
use chrono::{TimeDelta, Utc};

/// Answer of one part and how long solving it took
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub answer: String,
    pub duration: TimeDelta,
}

/// Run `f`, measuring wall-clock time with UTC timestamps
fn timed<T>(f: impl FnOnce() -> T) -> (T, TimeDelta) {
    let start = Utc::now();
    let value = f();
    (value, Utc::now() - start)
}

/// Parsed input of one year/day, ready to solve any part
pub struct SolverInstance<'a, S: Solver> {
    year: u16,
    day: u8,
    shared: S::SharedData<'a>,
    parse_duration: TimeDelta,
}

impl<'a, S: Solver> SolverInstance<'a, S> {
    pub fn new(year: u16, day: u8, input: &'a str) -> Result<Self, ParseError> {
        let (shared, parse_duration) = timed(|| S::parse(input));
        Ok(Self {
            year,
            day,
            shared: shared?,
            parse_duration,
        })
    }
}

/// Object-safe view of a [`SolverInstance`], as stored by the registry
///
/// ```no_run
/// use aoc_solver::DynSolver;
///
/// fn run_all(mut solver: Box<dyn DynSolver>) -> Result<(), aoc_solver::SolveError> {
///     for part in 1..=solver.parts() {
///         let result = solver.solve(part)?;
///         println!("{}/{} part {part}: {}", solver.year(), solver.day(), result.answer);
///     }
///     Ok(())
/// }
/// ```
pub trait DynSolver {
    /// Solve one part against the shared data, timing the call
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError>;

    fn parse_duration(&self) -> TimeDelta;

    fn year(&self) -> u16;

    fn day(&self) -> u8;

    fn parts(&self) -> u8;
}

impl<S: SolverExt> DynSolver for SolverInstance<'_, S> {
    fn solve(&mut self, part: u8) -> Result<SolveResult, SolveError> {
        let (answer, duration) = timed(|| S::solve_part_checked_range(&mut self.shared, part));
        Ok(SolveResult {
            answer: answer?,
            duration,
        })
    }

    fn parse_duration(&self) -> TimeDelta {
        self.parse_duration
    }

    fn year(&self) -> u16 {
        self.year
    }

    fn day(&self) -> u8 {
        self.day
    }

    fn parts(&self) -> u8 {
        S::PARTS
    }
}
