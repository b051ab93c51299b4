//! Advent of Code puzzle solutions with automatic registration
//!
//! This crate contains puzzle solutions organized by year plus shared
//! helpers under [`utils`]. Each solution uses the `AutoRegisterSolver`
//! derive macro for automatic plugin registration with the solver framework,
//! so linking the crate is enough to make its solvers visible to
//! `SolverRegistryBuilder::register_all_plugins`.

pub mod utils;

#[cfg(feature = "year-2023")]
pub mod my_solutions;
