//! Sequential executor for running solvers

use crate::config::Config;
use crate::error::{ArcExecutorError, ExecutorError};
use crate::input_store::InputStore;
use aoc_solver::{DynSolver, SolverRegistry};
use chrono::TimeDelta;
use std::ops::RangeInclusive;

/// Result from a single solver execution
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub year: u16,
    pub day: u8,
    pub part: u8,
    pub answer: Result<String, ArcExecutorError>,
    /// Set on the first part run after parsing
    pub parse_duration: Option<TimeDelta>,
    pub solve_duration: TimeDelta,
}

/// Work item representing a solver to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub year: u16,
    pub day: u8,
    pub parts: RangeInclusive<u8>,
}

/// Runs every selected solver in year/day/part order
pub struct Executor {
    registry: SolverRegistry,
    inputs: InputStore,
    year_filter: Option<u16>,
    day_filter: Option<u8>,
    part_filter: Option<u8>,
}

impl Executor {
    /// Create a new executor from config
    pub fn new(registry: SolverRegistry, config: &Config) -> Self {
        Self {
            registry,
            inputs: InputStore::new(config.input_dir.clone())
                .with_explicit_file(config.input_file.clone()),
            year_filter: config.year_filter,
            day_filter: config.day_filter,
            part_filter: config.part_filter,
        }
    }

    /// Collect work items by filtering from registry metadata
    pub fn collect_work_items(&self) -> Vec<WorkItem> {
        self.registry
            .storage()
            .iter_info()
            .filter(|info| self.year_filter.is_none_or(|y| info.year == y))
            .filter(|info| self.day_filter.is_none_or(|d| info.day == d))
            .map(|info| WorkItem {
                year: info.year,
                day: info.day,
                parts: self.filter_parts(info.parts),
            })
            .filter(|w| !w.parts.is_empty())
            .collect()
    }

    /// Year/day pairs among `work_items` with no input on disk
    pub fn missing_inputs(&self, work_items: &[WorkItem]) -> Vec<(u16, u8)> {
        work_items
            .iter()
            .filter(|w| !self.inputs.contains(w.year, w.day))
            .map(|w| (w.year, w.day))
            .collect()
    }

    /// Filter parts based on the part filter and solver's max parts
    #[allow(clippy::reversed_empty_ranges)]
    fn filter_parts(&self, max_parts: u8) -> RangeInclusive<u8> {
        match self.part_filter {
            Some(p) if p <= max_parts => p..=p,
            Some(_) => 1..=0, // Empty range - intentional
            None => 1..=max_parts,
        }
    }

    /// Execute all work items, handing each result to `emit` as soon as it is ready.
    ///
    /// Failures do not stop the run; they are emitted as error results and
    /// combined into the returned error.
    pub fn execute(&self, mut emit: impl FnMut(SolverResult)) -> Result<(), ArcExecutorError> {
        let mut collected_error: Option<ArcExecutorError> = None;
        for work in self.collect_work_items() {
            if let Err(e) = self.run_solver(&work, &mut emit) {
                collected_error = Some(ArcExecutorError::combine_opt(collected_error, e));
            }
        }
        collected_error.map_or(Ok(()), Err)
    }

    /// Run a single solver for its selected parts
    fn run_solver(
        &self,
        work: &WorkItem,
        emit: &mut impl FnMut(SolverResult),
    ) -> Result<(), ArcExecutorError> {
        let (year, day) = (work.year, work.day);
        let _span = tracing::info_span!("solver", year, day).entered();

        let input = self.inputs.get(year, day).map_err(|source| {
            ArcExecutorError::from(ExecutorError::Input { year, day, source })
        });
        let input = match input {
            Ok(input) => input,
            Err(e) => return Err(emit_error_results(work, e, emit)),
        };

        let mut solver = match self.registry.create_solver(year, day, &input) {
            Ok(solver) => solver,
            Err(source) => {
                let e = ExecutorError::Solver { year, day, source }.into();
                return Err(emit_error_results(work, e, emit));
            }
        };
        let mut parse_duration = Some(solver.parse_duration());
        tracing::info!(parse_us = solver.parse_duration().num_microseconds(), "parsed input");

        let mut collected_error = None;
        for part in work.parts.clone() {
            let mut result = solve_part_internal(year, day, part, &mut *solver);
            result.parse_duration = parse_duration.take();
            if let Err(e) = &result.answer {
                collected_error = Some(ArcExecutorError::combine_opt(collected_error, e.clone()));
            }
            emit(result);
        }
        collected_error.map_or(Ok(()), Err)
    }
}

/// Emit `error` once per selected part and hand it back
fn emit_error_results(
    work: &WorkItem,
    error: ArcExecutorError,
    emit: &mut impl FnMut(SolverResult),
) -> ArcExecutorError {
    tracing::warn!(year = work.year, day = work.day, %error, "skipping solver");
    for part in work.parts.clone() {
        emit(make_error_result(work.year, work.day, part, error.clone()));
    }
    error
}

fn make_error_result(year: u16, day: u8, part: u8, error: ArcExecutorError) -> SolverResult {
    SolverResult {
        year,
        day,
        part,
        answer: Err(error),
        parse_duration: None,
        solve_duration: TimeDelta::zero(),
    }
}

/// Solve a single part
fn solve_part_internal(year: u16, day: u8, part: u8, solver: &mut dyn DynSolver) -> SolverResult {
    match solver.solve(part) {
        Ok(solved) => {
            tracing::info!(part, solve_us = solved.duration.num_microseconds(), "solved");
            SolverResult {
                year,
                day,
                part,
                solve_duration: solved.duration,
                answer: Ok(solved.answer),
                parse_duration: None,
            }
        }
        Err(e) => {
            let error = ExecutorError::Solver {
                year,
                day,
                source: e.into(),
            };
            make_error_result(year, day, part, error.into())
        }
    }
}
