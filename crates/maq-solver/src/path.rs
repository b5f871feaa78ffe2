// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Greedy path construction over hull-pruned units.
//!
//! A max-heap holds at most one live candidate per unit: initially the
//! unit's cheapest arm keyed by `reward / cost`, afterwards the next hull
//! arm keyed by its marginal slope. Committing a candidate refunds the
//! unit's previous assignment, so each unit carries exactly one active arm
//! at any step of the curve.

use maq_core::{Arm, SolutionPath, SolveContext};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug)]
struct UpgradeCandidate {
    unit: usize,
    position: usize,
    priority: f64,
}

impl PartialEq for UpgradeCandidate {
    fn eq(&self, other: &Self) -> bool {
        self.unit == other.unit
            && self.position == other.position
            && self.priority.to_bits() == other.priority.to_bits()
    }
}

impl Eq for UpgradeCandidate {}

impl PartialOrd for UpgradeCandidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UpgradeCandidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Greatest marginal return pops first; ties pop the lower unit
        // index, then the lower position. Any tie order yields a valid
        // optimal prefix of the curve, a fixed one makes replay exact.
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.unit.cmp(&self.unit))
            .then_with(|| other.position.cmp(&self.position))
    }
}

/// Builds the allocation curve for `units` under `budget`.
///
/// `units` must already satisfy the hull postconditions: each candidate's
/// upgrade slope is then strictly positive and strictly below the priority
/// its predecessor was drawn with, so the heap never reorders a unit's own
/// arms. The heap holds `(unit, position)` handles into `units`, which must
/// not be resized while the build runs; the shared borrow on `units`
/// enforces that here.
///
/// The terminal step may overshoot the budget by one commit (the rounded-up
/// curve endpoint). A budget <= 0 admits no step at all.
pub fn build_path(
    units: &[Vec<Arm>],
    budget: f64,
    progress_every: usize,
    ctx: &SolveContext<'_>,
) -> SolutionPath {
    let progress_every = progress_every.max(1);
    let total_arms: usize = units.iter().map(Vec::len).sum();

    let mut heap = BinaryHeap::with_capacity(units.len());
    for (unit, arms) in units.iter().enumerate() {
        if let Some(first) = arms.first() {
            // reward / 0.0 = +inf for a free arm: it pops before any paid one.
            heap.push(UpgradeCandidate {
                unit,
                position: 0,
                priority: first.reward / first.cost,
            });
        }
    }

    let mut active_index = vec![0usize; units.len()];
    let mut spend = 0.0;
    let mut gain = 0.0;
    let mut path = SolutionPath::default();

    while spend < budget {
        let Some(top) = heap.pop() else {
            break;
        };
        let candidate = units[top.unit][top.position];

        if active_index[top.unit] > 0 {
            let previous = units[top.unit][active_index[top.unit] - 1];
            spend -= previous.cost;
            gain -= previous.reward;
        }

        spend += candidate.cost;
        gain += candidate.reward;
        path.cost_path.push(spend);
        path.reward_path.push(gain);
        path.unit_path.push(top.unit);
        path.treatment_path.push(candidate.id);
        active_index[top.unit] += 1;

        let next = active_index[top.unit];
        if let Some(upgrade) = units[top.unit].get(next) {
            let priority =
                (upgrade.reward - candidate.reward) / (upgrade.cost - candidate.cost);
            // Two consecutive equal costs would make this NaN; the hull's
            // strictly-increasing-cost postcondition rules that out.
            debug_assert!(!priority.is_nan(), "upgrade priority must not be NaN");
            heap.push(UpgradeCandidate {
                unit: top.unit,
                position: next,
                priority,
            });
        }

        if path.len() % progress_every == 0 && total_arms > 0 {
            ctx.report_progress(path.len() as f32 / total_arms as f32);
        }

        // Maximum spend reached: stop at the rounded-up endpoint.
        if spend >= budget {
            break;
        }
    }

    path.complete = heap.is_empty();
    ctx.report_progress(1.0);
    path
}
