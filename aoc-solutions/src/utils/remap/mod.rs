//! Interval remapping over half-open integer ranges
//!
//! A [`Pipeline`] is an ordered list of [`Stage`]s. Each stage holds
//! [`MappingRule`]s that shift every value of a source interval by a constant
//! offset; values outside every rule pass through unchanged. The output of
//! one stage is the input of the next.
//!
//! Two entry points share the same semantics:
//!
//! - [`lookup_point`] maps one value through all stages
//! - [`run_pipeline`] maps whole [`Range`]s, splitting them at rule
//!   boundaries, and reports the smallest resulting start
//!
//! For every value `v`, `Stage::split_range(Range::new(v, 1))` yields exactly
//! `[Range::new(stage.lookup_point(v), 1)]`.
//!
//! # Rule order
//!
//! Within a stage the first rule (in authored order) whose source interval
//! contains a value is the one applied to it. Once a piece of a range is
//! translated it is settled for that stage. Untranslated leftovers keep being
//! checked against the later rules. With pairwise-disjoint rules the order is
//! irrelevant; [`Stage::find_overlap`] reports inputs where it is not.
//!
//! # Example
//!
//! ```
//! use aoc_solutions::utils::remap::{run_pipeline, lookup_point, MappingRule, Range, Stage};
//!
//! let seed_to_soil = Stage::new(vec![
//!     MappingRule::new(50, 98, 2).unwrap(),
//!     MappingRule::new(52, 50, 48).unwrap(),
//! ]);
//! let stages = [seed_to_soil];
//!
//! assert_eq!(lookup_point(79, &stages), 81);
//! assert_eq!(lookup_point(99, &stages), 51);
//!
//! let seeds = [Range::new(95, 5).unwrap()];
//! // [95, 98) -> [97, 100), [98, 100) -> [50, 52)
//! assert_eq!(run_pipeline(&seeds, &stages), Some(50));
//! ```

mod pipeline;
mod range;
mod rule;
mod stage;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub use pipeline::{lookup_point, run_pipeline, Pipeline};
pub use range::Range;
pub use rule::{MappingRule, Overlap};
pub use stage::Stage;

/// Rejected range or rule definitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemapError {
    /// Ranges and rules must cover at least one value
    #[error("range length must be > 0 (start = {start}, length = {length})")]
    EmptyRange { start: i64, length: i64 },

    /// `start + length` does not fit in an i64
    #[error("range end overflows (start = {start}, length = {length})")]
    EndOverflow { start: i64, length: i64 },

    /// `dest_start - source_start` does not fit in an i64
    #[error("offset overflows (destination_start = {dest_start}, source_start = {source_start})")]
    OffsetOverflow { dest_start: i64, source_start: i64 },
}
