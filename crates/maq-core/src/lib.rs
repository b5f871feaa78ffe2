// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

pub mod arm;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod flat;
pub mod observability;
pub mod solution;

pub use arm::Arm;
pub use context::SolveContext;
pub use diagnostics::{DIAGNOSTICS_SCHEMA_VERSION, Diagnostics, PruningStats};
pub use error::MaqError;
pub use flat::FlatTreatmentData;
pub use observability::{ProgressSink, StderrTelemetry, TelemetrySink};
pub use solution::{MaqSolution, SolutionPath};

/// Core shared types for the maq workspace.
pub fn crate_name() -> &'static str {
    "maq-core"
}
