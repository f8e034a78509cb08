//! CLI command implementations.

pub mod combos;
pub mod run;
