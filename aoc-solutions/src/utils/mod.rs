//! Helpers shared between solutions

pub mod remap;
