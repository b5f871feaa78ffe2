// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use crate::MaqError;

/// Owned flat-buffer ingest record for one solve.
///
/// Six parallel buffers describe a ragged (unit, option) layout without any
/// per-option container overhead: `list_offsets` delimits each unit's slice
/// of the flat arrays, and `str_offsets` locates each option's identifier
/// bytes inside `str_data`. Construction moves the buffers in; the
/// preprocessor consumes the record and releases them, so the caller must
/// not retain any view of this data.
///
/// Only O(1) shape checks happen here. Offset monotonicity and UTF-8
/// conformance remain the producer's contract.
#[derive(Clone, Debug, PartialEq)]
pub struct FlatTreatmentData {
    pub num_units: i64,
    pub list_offsets: Vec<i32>,
    pub rewards_flat: Vec<f64>,
    pub costs_flat: Vec<f64>,
    pub str_offsets: Vec<i32>,
    pub str_data: Vec<u8>,
}

fn offset_as_len(offset: i32, name: &str) -> Result<usize, MaqError> {
    usize::try_from(offset).map_err(|_| {
        MaqError::invalid_input(format!("{name} terminal offset must be >= 0; got {offset}"))
    })
}

impl FlatTreatmentData {
    pub fn new(
        num_units: i64,
        list_offsets: Vec<i32>,
        rewards_flat: Vec<f64>,
        costs_flat: Vec<f64>,
        str_offsets: Vec<i32>,
        str_data: Vec<u8>,
    ) -> Result<Self, MaqError> {
        let units = usize::try_from(num_units).map_err(|_| {
            MaqError::invalid_input(format!("num_units must be >= 0; got {num_units}"))
        })?;

        if list_offsets.len() != units + 1 {
            return Err(MaqError::invalid_input(format!(
                "list_offsets must have num_units + 1 = {} entries; got {}",
                units + 1,
                list_offsets.len()
            )));
        }
        if list_offsets[0] != 0 {
            return Err(MaqError::invalid_input(format!(
                "list_offsets[0] must be 0; got {}",
                list_offsets[0]
            )));
        }

        let flat_len = rewards_flat.len();
        if costs_flat.len() != flat_len {
            return Err(MaqError::invalid_input(format!(
                "rewards_flat and costs_flat must have equal length; got {} and {}",
                flat_len,
                costs_flat.len()
            )));
        }
        let terminal = offset_as_len(list_offsets[units], "list_offsets")?;
        if terminal != flat_len {
            return Err(MaqError::invalid_input(format!(
                "list_offsets terminal entry must equal the flat length {flat_len}; got {terminal}"
            )));
        }

        if str_offsets.len() != flat_len + 1 {
            return Err(MaqError::invalid_input(format!(
                "str_offsets must have flat length + 1 = {} entries; got {}",
                flat_len + 1,
                str_offsets.len()
            )));
        }
        if str_offsets[0] != 0 {
            return Err(MaqError::invalid_input(format!(
                "str_offsets[0] must be 0; got {}",
                str_offsets[0]
            )));
        }
        let str_terminal = offset_as_len(str_offsets[flat_len], "str_offsets")?;
        if str_terminal != str_data.len() {
            return Err(MaqError::invalid_input(format!(
                "str_offsets terminal entry must equal the string byte length {}; got {str_terminal}",
                str_data.len()
            )));
        }

        Ok(Self {
            num_units,
            list_offsets,
            rewards_flat,
            costs_flat,
            str_offsets,
            str_data,
        })
    }

    /// Number of units described by this record.
    pub fn num_units(&self) -> usize {
        // Non-negativity is checked at construction.
        self.num_units as usize
    }

    /// Total option count across all units.
    pub fn flat_len(&self) -> usize {
        self.rewards_flat.len()
    }
}

#[cfg(test)]
mod tests {
    use super::FlatTreatmentData;

    fn two_unit_record() -> FlatTreatmentData {
        // Unit 0 has options "a", "b"; unit 1 has option "a".
        FlatTreatmentData::new(
            2,
            vec![0, 2, 3],
            vec![1.0, 2.0, 3.0],
            vec![0.5, 1.0, 1.5],
            vec![0, 1, 2, 3],
            b"aba".to_vec(),
        )
        .expect("record should be well-formed")
    }

    #[test]
    fn well_formed_record_reports_counts() {
        let data = two_unit_record();
        assert_eq!(data.num_units(), 2);
        assert_eq!(data.flat_len(), 3);
    }

    #[test]
    fn empty_record_is_legal() {
        let data = FlatTreatmentData::new(0, vec![0], vec![], vec![], vec![0], vec![])
            .expect("empty record should be well-formed");
        assert_eq!(data.num_units(), 0);
        assert_eq!(data.flat_len(), 0);
    }

    #[test]
    fn negative_num_units_is_rejected() {
        let err = FlatTreatmentData::new(-1, vec![0], vec![], vec![], vec![0], vec![])
            .expect_err("negative num_units must fail");
        assert!(err.to_string().contains("num_units"));
    }

    #[test]
    fn list_offsets_length_mismatch_is_rejected() {
        let err = FlatTreatmentData::new(2, vec![0, 1], vec![1.0], vec![1.0], vec![0, 1], vec![b'x'])
            .expect_err("short list_offsets must fail");
        assert!(err.to_string().contains("list_offsets"));
    }

    #[test]
    fn nonzero_leading_offset_is_rejected() {
        let err = FlatTreatmentData::new(1, vec![1, 1], vec![], vec![], vec![0], vec![])
            .expect_err("list_offsets[0] != 0 must fail");
        assert!(err.to_string().contains("list_offsets[0]"));
    }

    #[test]
    fn reward_cost_length_mismatch_is_rejected() {
        let err = FlatTreatmentData::new(
            1,
            vec![0, 2],
            vec![1.0, 2.0],
            vec![1.0],
            vec![0, 1, 2],
            b"ab".to_vec(),
        )
        .expect_err("unequal rewards/costs must fail");
        assert!(err.to_string().contains("equal length"));
    }

    #[test]
    fn terminal_list_offset_must_match_flat_length() {
        let err = FlatTreatmentData::new(
            1,
            vec![0, 3],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![0, 1, 2],
            b"ab".to_vec(),
        )
        .expect_err("terminal offset mismatch must fail");
        assert!(err.to_string().contains("terminal"));
    }

    #[test]
    fn terminal_str_offset_must_match_byte_length() {
        let err = FlatTreatmentData::new(
            1,
            vec![0, 2],
            vec![1.0, 2.0],
            vec![1.0, 2.0],
            vec![0, 1, 4],
            b"ab".to_vec(),
        )
        .expect_err("str terminal mismatch must fail");
        assert!(err.to_string().contains("string byte length"));
    }
}
