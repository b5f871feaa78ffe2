// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod hull;
pub mod path;
pub mod preprocess;
pub mod solver;

pub use hull::{prune_unit, prune_units};
pub use path::build_path;
pub use preprocess::{PreprocessOutput, preprocess_flat, preprocess_jagged};
pub use solver::{PROFILE_ENV_VAR, Solver, SolverConfig, solve};

/// Solver namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = maq_core::crate_name();
    "maq-solver"
}
