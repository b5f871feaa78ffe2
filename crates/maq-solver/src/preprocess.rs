// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use ahash::AHashMap;
use maq_core::{Arm, FlatTreatmentData, MaqError};

/// Interned per-unit option lists plus the dense-id → identifier table.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PreprocessOutput {
    pub units: Vec<Vec<Arm>>,
    pub treatment_ids: Vec<String>,
}

/// First-seen string interner over dense `u32` ids.
///
/// Lookups probe with a borrowed `&str` (`Borrow<str>` on the map key), so
/// the flat-walk hot path allocates only on the first encounter of each
/// distinct identifier, never per option.
#[derive(Debug, Default)]
struct TreatmentInterner {
    id_by_name: AHashMap<String, u32>,
    names: Vec<String>,
}

impl TreatmentInterner {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            id_by_name: AHashMap::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
        }
    }

    fn intern(&mut self, name: &str) -> Result<u32, MaqError> {
        if let Some(&id) = self.id_by_name.get(name) {
            return Ok(id);
        }
        let id = u32::try_from(self.names.len()).map_err(|_| {
            MaqError::resource_limit(format!(
                "treatment id space exhausted: more than {} distinct identifiers",
                u32::MAX
            ))
        })?;
        self.id_by_name.insert(name.to_owned(), id);
        self.names.push(name.to_owned());
        Ok(id)
    }

    fn into_names(self) -> Vec<String> {
        self.names
    }
}

fn offset_index(offset: i32, what: &str, at: usize) -> Result<usize, MaqError> {
    usize::try_from(offset).map_err(|_| {
        MaqError::invalid_input(format!("{what}[{at}] must be >= 0; got {offset}"))
    })
}

/// Walks the flat buffers unit-major, interning identifiers and emitting one
/// `Vec<Arm>` per unit. Consumes the record; all six buffers are released
/// before this function returns, ahead of the hull pass.
pub fn preprocess_flat(data: FlatTreatmentData) -> Result<PreprocessOutput, MaqError> {
    let FlatTreatmentData {
        num_units,
        list_offsets,
        rewards_flat,
        costs_flat,
        str_offsets,
        str_data,
    } = data;
    // Non-negativity was checked when the record was built.
    let num_units = num_units as usize;

    let mut interner = TreatmentInterner::default();
    let mut units = Vec::with_capacity(num_units);

    for i in 0..num_units {
        let start = offset_index(list_offsets[i], "list_offsets", i)?;
        let end = offset_index(list_offsets[i + 1], "list_offsets", i + 1)?;
        if end < start || end > rewards_flat.len() {
            return Err(MaqError::invalid_input(format!(
                "list_offsets must be monotone within the flat length; got [{start}, {end}) for unit {i}"
            )));
        }

        let mut arms = Vec::with_capacity(end - start);
        for j in start..end {
            let byte_start = offset_index(str_offsets[j], "str_offsets", j)?;
            let byte_end = offset_index(str_offsets[j + 1], "str_offsets", j + 1)?;
            let bytes = str_data.get(byte_start..byte_end).ok_or_else(|| {
                MaqError::invalid_input(format!(
                    "str_offsets must be monotone within the string bytes; got [{byte_start}, {byte_end}) at flat index {j}"
                ))
            })?;
            let name = std::str::from_utf8(bytes).map_err(|_| {
                MaqError::invalid_input(format!(
                    "treatment identifier at flat index {j} is not valid UTF-8"
                ))
            })?;
            let id = interner.intern(name)?;
            arms.push(Arm::new(id, rewards_flat[j], costs_flat[j]));
        }
        units.push(arms);
    }

    // Inputs can be multi-GB; release them before the hull pass so peak
    // memory is bounded by the interned representation.
    drop(list_offsets);
    drop(rewards_flat);
    drop(costs_flat);
    drop(str_offsets);
    drop(str_data);

    Ok(PreprocessOutput {
        units,
        treatment_ids: interner.into_names(),
    })
}

/// Jagged-input preprocessing variant: three parallel ragged arrays instead
/// of flat buffers. Same interning semantics as [`preprocess_flat`];
/// per-unit inputs are dropped as they are consumed.
pub fn preprocess_jagged(
    treatment_ids: Vec<Vec<String>>,
    rewards: Vec<Vec<f64>>,
    costs: Vec<Vec<f64>>,
) -> Result<PreprocessOutput, MaqError> {
    if treatment_ids.len() != rewards.len() || treatment_ids.len() != costs.len() {
        return Err(MaqError::invalid_input(format!(
            "ragged arrays must have equal unit counts; got ids={}, rewards={}, costs={}",
            treatment_ids.len(),
            rewards.len(),
            costs.len()
        )));
    }

    let num_units = treatment_ids.len();
    let mut interner = TreatmentInterner::with_capacity(16);
    let mut units = Vec::with_capacity(num_units);

    for (i, ((unit_ids, unit_rewards), unit_costs)) in treatment_ids
        .into_iter()
        .zip(rewards)
        .zip(costs)
        .enumerate()
    {
        if unit_ids.len() != unit_rewards.len() || unit_ids.len() != unit_costs.len() {
            return Err(MaqError::invalid_input(format!(
                "unit {i} has mismatched option counts: ids={}, rewards={}, costs={}",
                unit_ids.len(),
                unit_rewards.len(),
                unit_costs.len()
            )));
        }

        let mut arms = Vec::with_capacity(unit_ids.len());
        for ((name, reward), cost) in unit_ids.into_iter().zip(unit_rewards).zip(unit_costs) {
            let id = interner.intern(&name)?;
            arms.push(Arm::new(id, reward, cost));
        }
        units.push(arms);
    }

    Ok(PreprocessOutput {
        units,
        treatment_ids: interner.into_names(),
    })
}
