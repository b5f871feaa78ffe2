// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::hull::prune_units;
use crate::path::build_path;
use crate::preprocess::{PreprocessOutput, preprocess_flat, preprocess_jagged};
use maq_core::{
    Diagnostics, FlatTreatmentData, MaqError, MaqSolution, PruningStats, SolveContext,
    StderrTelemetry,
};
use std::borrow::Cow;
use std::time::Instant;

const DEFAULT_PROGRESS_REPORT_EVERY: usize = 65_536;

/// Environment variable that enables the default stderr telemetry sink in
/// [`solve`]. Observational only; results are unaffected.
pub const PROFILE_ENV_VAR: &str = "MAQ_PROFILE";

/// Configuration for [`Solver`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub progress_report_every: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            progress_report_every: DEFAULT_PROGRESS_REPORT_EVERY,
        }
    }
}

impl SolverConfig {
    fn validate(&self) -> Result<(), MaqError> {
        Ok(())
    }

    fn normalized_progress_report_every(&self) -> usize {
        self.progress_report_every.max(1)
    }
}

/// Budget-constrained greedy Qini path solver.
///
/// One `Solver` may run any number of solves; a single solve is an atomic
/// single-threaded computation (preprocess, hull prune, path build) with no
/// suspension points.
#[derive(Clone, Debug)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Result<Self, MaqError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solves from the flat-buffer ingest record. The record is consumed;
    /// its buffers are released before hull pruning begins.
    pub fn solve_flat(
        &self,
        data: FlatTreatmentData,
        budget: f64,
        ctx: &SolveContext<'_>,
    ) -> Result<MaqSolution, MaqError> {
        let flat_len = data.flat_len();
        let preprocess_started = Instant::now();
        let preprocessed = preprocess_flat(data)?;
        let preprocess_ms = elapsed_ms(preprocess_started);
        Ok(self.run_phases(preprocessed, flat_len, preprocess_ms, budget, ctx))
    }

    /// Solves from three parallel ragged arrays (the jagged ingest
    /// variant).
    pub fn solve_jagged(
        &self,
        treatment_ids: Vec<Vec<String>>,
        rewards: Vec<Vec<f64>>,
        costs: Vec<Vec<f64>>,
        budget: f64,
        ctx: &SolveContext<'_>,
    ) -> Result<MaqSolution, MaqError> {
        let flat_len = rewards.iter().map(Vec::len).sum();
        let preprocess_started = Instant::now();
        let preprocessed = preprocess_jagged(treatment_ids, rewards, costs)?;
        let preprocess_ms = elapsed_ms(preprocess_started);
        Ok(self.run_phases(preprocessed, flat_len, preprocess_ms, budget, ctx))
    }

    fn run_phases(
        &self,
        preprocessed: PreprocessOutput,
        flat_len: usize,
        preprocess_ms: u64,
        budget: f64,
        ctx: &SolveContext<'_>,
    ) -> MaqSolution {
        let PreprocessOutput {
            mut units,
            treatment_ids,
        } = preprocessed;
        let num_units = units.len();
        ctx.record_scalar("preprocess.runtime_ms", preprocess_ms as f64);
        ctx.record_scalar("preprocess.flat_len", flat_len as f64);
        ctx.record_scalar(
            "preprocess.distinct_treatments",
            treatment_ids.len() as f64,
        );

        let prune_started = Instant::now();
        prune_units(&mut units);
        let prune_ms = elapsed_ms(prune_started);
        let arms_kept: usize = units.iter().map(Vec::len).sum();
        ctx.record_scalar("hull.runtime_ms", prune_ms as f64);
        ctx.record_scalar("hull.arms_kept", arms_kept as f64);

        let path_started = Instant::now();
        let path = build_path(
            &units,
            budget,
            self.config.normalized_progress_report_every(),
            ctx,
        );
        let path_ms = elapsed_ms(path_started);
        ctx.record_scalar("path.runtime_ms", path_ms as f64);
        ctx.record_scalar("path.steps", path.len() as f64);

        let mut notes = vec![format!(
            "budget={budget}, steps={}, complete={}",
            path.len(),
            path.complete
        )];
        notes.push(format!("arms_in={flat_len}, arms_kept={arms_kept}"));
        let mut warnings = vec![];
        if budget <= 0.0 {
            warnings.push(format!("budget={budget} admits no assignment; path is empty"));
        }

        let diagnostics = Diagnostics {
            num_units,
            flat_len,
            distinct_treatments: treatment_ids.len(),
            preprocess_ms: Some(preprocess_ms),
            prune_ms: Some(prune_ms),
            path_ms: Some(path_ms),
            notes,
            warnings,
            algorithm: Cow::Borrowed("greedy_qini"),
            pruning_stats: Some(PruningStats {
                arms_in: flat_len,
                arms_kept,
            }),
            ..Diagnostics::default()
        };

        MaqSolution {
            path,
            treatment_ids,
            num_units,
            budget,
            diagnostics,
        }
    }
}

fn elapsed_ms(started_at: Instant) -> u64 {
    match u64::try_from(started_at.elapsed().as_millis()) {
        Ok(ms) => ms,
        Err(_) => u64::MAX,
    }
}

fn profiling_enabled() -> bool {
    std::env::var(PROFILE_ENV_VAR).is_ok_and(|raw| raw == "1")
}

/// Convenience entry point: default configuration, no observers unless
/// `MAQ_PROFILE=1` is set, in which case per-phase timings go to stderr.
pub fn solve(data: FlatTreatmentData, budget: f64) -> Result<MaqSolution, MaqError> {
    let solver = Solver::new(SolverConfig::default())?;
    if profiling_enabled() {
        let telemetry = StderrTelemetry;
        let ctx = SolveContext::new().with_telemetry_sink(&telemetry);
        solver.solve_flat(data, budget, &ctx)
    } else {
        solver.solve_flat(data, budget, &SolveContext::new())
    }
}
