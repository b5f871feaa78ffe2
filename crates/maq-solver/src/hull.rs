// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

//! Per-unit upper-left concave hull on the (cost, reward) plane.
//!
//! A Graham-scan variant with the angle test replaced by an LP-dominance
//! criterion: walking candidates in cost order, a candidate evicts the top
//! of the selection stack whenever the chord it forms with the point below
//! the top is steeper than the chord the top forms with that point. What
//! survives is, per unit, a sequence with strictly increasing cost,
//! strictly increasing reward, non-increasing marginal slopes, and only
//! positive rewards.

use maq_core::Arm;

/// Stand-in point below the bottom of the stack: the do-nothing assignment.
const ORIGIN: Arm = Arm {
    id: 0,
    reward: 0.0,
    cost: 0.0,
};

/// LP-dominance test for `candidate` against the top of `selections`.
///
/// With j the point below the top (or [`ORIGIN`]), k the top, and l the
/// candidate, this is the cross-multiplied form of
/// `(r_l - r_k)/(c_l - c_k) > (r_k - r_j)/(c_k - c_j)`; equality keeps the
/// earlier point. Equal costs make the divided form inf/NaN, which the
/// cross-multiplied comparison resolves to "not dominating" and the push
/// guard in [`prune_unit`] then settles by reward.
fn dominates_top(selections: &[Arm], candidate: Arm) -> bool {
    let below = if selections.len() >= 2 {
        selections[selections.len() - 2]
    } else {
        ORIGIN
    };
    let top = selections[selections.len() - 1];
    if top.reward <= 0.0 {
        return true;
    }

    (candidate.reward - top.reward) * (top.cost - below.cost)
        > (top.reward - below.reward) * (candidate.cost - top.cost)
}

/// Prunes one unit's options in place to its concave upper envelope.
pub fn prune_unit(arms: &mut Vec<Arm>) {
    arms.sort_unstable_by(|a, b| a.cost.total_cmp(&b.cost));

    let mut cursor = 0;
    while cursor < arms.len() && arms[cursor].reward <= 0.0 {
        cursor += 1;
    }
    if cursor == arms.len() {
        arms.clear();
        return;
    }

    let mut selections = Vec::with_capacity(arms.len() - cursor);
    selections.push(arms[cursor]);
    cursor += 1;

    while cursor < arms.len() {
        let candidate = arms[cursor];
        cursor += 1;

        while !selections.is_empty() && dominates_top(&selections, candidate) {
            selections.pop();
        }

        if candidate.reward > 0.0
            && selections
                .last()
                .is_none_or(|top| candidate.reward > top.reward)
        {
            selections.push(candidate);
        }
    }

    *arms = selections;
}

/// Prunes every unit independently.
pub fn prune_units(units: &mut [Vec<Arm>]) {
    for arms in units.iter_mut() {
        prune_unit(arms);
    }
}
