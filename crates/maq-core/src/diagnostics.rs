// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use std::borrow::Cow;

/// Diagnostics schema version for solve-run metadata.
pub const DIAGNOSTICS_SCHEMA_VERSION: u32 = 1;

/// Counters that summarize hull-pruning effectiveness during a solve.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PruningStats {
    pub arms_in: usize,
    pub arms_kept: usize,
}

/// Structured diagnostics captured from a solve.
///
/// Each phase owns its own timer; a `None` runtime means the phase never
/// ran (e.g. `prune_ms` on an empty input is still `Some(0)`, but a failed
/// ingest produces no diagnostics at all).
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostics {
    pub num_units: usize,
    pub flat_len: usize,
    pub distinct_treatments: usize,
    pub schema_version: u32,
    pub engine_version: Option<String>,
    pub preprocess_ms: Option<u64>,
    pub prune_ms: Option<u64>,
    pub path_ms: Option<u64>,
    pub notes: Vec<String>,
    pub warnings: Vec<String>,
    pub algorithm: Cow<'static, str>,
    pub pruning_stats: Option<PruningStats>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            num_units: 0,
            flat_len: 0,
            distinct_treatments: 0,
            schema_version: DIAGNOSTICS_SCHEMA_VERSION,
            engine_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            preprocess_ms: None,
            prune_ms: None,
            path_ms: None,
            notes: vec![],
            warnings: vec![],
            algorithm: Cow::Borrowed(""),
            pruning_stats: None,
        }
    }
}
