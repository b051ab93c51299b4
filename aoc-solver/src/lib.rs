//! Advent of Code Solver Library
//!
//! A small, type-safe framework for puzzle solvers. Each puzzle is a type
//! that parses its input once into shared data and then answers one or more
//! parts from that data.
//!
//! # Overview
//!
//! - [`AocParser`] parses input into `SharedData<'a>` (owned or borrowed)
//! - [`PartSolver<N>`] solves part `N`
//! - [`Solver`] ties the parts together, usually via `#[derive(AocSolver)]`
//! - [`SolverRegistry`] maps `(year, day)` to solver factories, filled either
//!   by hand or from `#[derive(AutoRegisterSolver)]` plugins
//! - [`DynSolver`] is the type-erased handle the registry hands out
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, SolverRegistryBuilder};
//!
//! #[derive(AocSolver)]
//! #[aoc_solver(max_parts = 2)]
//! pub struct Depths;
//!
//! impl AocParser for Depths {
//!     type SharedData<'a> = Vec<i64>;
//!
//!     fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
//!         input
//!             .lines()
//!             .map(|line| line.parse().map_err(|_| ParseError::InvalidFormat(line.into())))
//!             .collect()
//!     }
//! }
//!
//! impl PartSolver<1> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().sum::<i64>().to_string())
//!     }
//! }
//!
//! impl PartSolver<2> for Depths {
//!     fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
//!         Ok(shared.iter().product::<i64>().to_string())
//!     }
//! }
//!
//! let mut builder = SolverRegistryBuilder::new();
//! aoc_solver::register_solver!(builder, Depths, 2023, 1);
//! let registry = builder.build();
//!
//! let mut solver = registry.create_solver(2023, 1, "2\n3\n4").unwrap();
//! assert_eq!(solver.solve(1).unwrap().answer, "9");
//! assert_eq!(solver.solve(2).unwrap().answer, "24");
//! ```
//!
//! # Part Dependencies
//!
//! Parts receive `&mut SharedData`, so a part can stash intermediate results
//! (for example an `Option<Cache>` field) that a later part reuses.

mod error;
mod instance;
mod registry;
mod solver;

pub use error::{ParseError, RegistrationError, SolveError, SolverError};
pub use instance::{DynSolver, SolveResult, SolverInstance};
pub use registry::{
    FactoryInfo, RegisterableSolver, SolverFactory, SolverFactoryStorage, SolverPlugin,
    SolverRegistry, SolverRegistryBuilder, BASE_YEAR, CAPACITY, DAYS_PER_YEAR, MAX_YEARS,
};
pub use solver::{AocParser, PartSolver, Solver, SolverExt};

// Re-export inventory for use by the derive macro
pub use inventory;

pub use aoc_solver_macros::{AocSolver, AutoRegisterSolver};
