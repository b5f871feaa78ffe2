// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::diagnostics::Diagnostics;
use crate::error::MaqError;

/// The emitted allocation curve: four parallel step sequences plus a
/// completion flag.
///
/// `cost_path[i]` / `reward_path[i]` are cumulative spend and gain after
/// step `i`; `unit_path[i]` / `treatment_path[i]` identify the unit that
/// received a new or upgraded assignment and the dense treatment id now
/// active for it. `complete` is true iff the greedy loop drained every
/// candidate rather than stopping on the budget.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SolutionPath {
    pub cost_path: Vec<f64>,
    pub reward_path: Vec<f64>,
    pub unit_path: Vec<usize>,
    pub treatment_path: Vec<u32>,
    pub complete: bool,
}

impl SolutionPath {
    /// Number of committed steps.
    pub fn len(&self) -> usize {
        self.cost_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cost_path.is_empty()
    }

    /// Checks the structural path contract: equal sequence lengths and
    /// non-decreasing cumulative cost and reward.
    pub fn validate(&self) -> Result<(), MaqError> {
        let steps = self.cost_path.len();
        if self.reward_path.len() != steps
            || self.unit_path.len() != steps
            || self.treatment_path.len() != steps
        {
            return Err(MaqError::invalid_input(format!(
                "path sequences must have equal lengths; got cost={}, reward={}, unit={}, treatment={}",
                steps,
                self.reward_path.len(),
                self.unit_path.len(),
                self.treatment_path.len()
            )));
        }

        for window in self.cost_path.windows(2) {
            if window[1] < window[0] {
                return Err(MaqError::numerical_issue(format!(
                    "cost_path must be non-decreasing; got {} then {}",
                    window[0], window[1]
                )));
            }
        }
        for window in self.reward_path.windows(2) {
            if window[1] < window[0] {
                return Err(MaqError::numerical_issue(format!(
                    "reward_path must be non-decreasing; got {} then {}",
                    window[0], window[1]
                )));
            }
        }

        Ok(())
    }
}

/// Assembled output of one solve: the path, the treatment-id table, and
/// run diagnostics.
///
/// `treatment_ids[k]` recovers the original string identifier for dense id
/// `k` (insertion order of first encounter). `budget` is the spend level
/// the path was fitted to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct MaqSolution {
    pub path: SolutionPath,
    pub treatment_ids: Vec<String>,
    pub num_units: usize,
    pub budget: f64,
    pub diagnostics: Diagnostics,
}

impl MaqSolution {
    /// Extracts the per-unit allocation at a spend level at or below the
    /// fitted budget: for each unit, the dense treatment id active at the
    /// last step whose cumulative cost is within `budget`, or `None` if
    /// the unit was never assigned.
    ///
    /// Querying past the frontier of an incomplete path is an error: the
    /// curve beyond the fitted budget was never computed, so the caller
    /// must re-solve with a larger budget instead.
    pub fn allocation_at(&self, budget: f64) -> Result<Vec<Option<u32>>, MaqError> {
        if !self.path.complete && budget > self.budget {
            return Err(MaqError::invalid_input(format!(
                "allocation requested at budget {budget} but the path is only fitted up to {}; re-solve with a larger budget",
                self.budget
            )));
        }

        let mut active = vec![None; self.num_units];
        for (step, &spend) in self.path.cost_path.iter().enumerate() {
            if spend > budget {
                break;
            }
            active[self.path.unit_path[step]] = Some(self.path.treatment_path[step]);
        }
        Ok(active)
    }
}
