// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

/// Benchmark namespace placeholder.
pub fn crate_name() -> &'static str {
    let _ = (maq_core::crate_name(), maq_solver::crate_name());
    "maq-bench"
}
