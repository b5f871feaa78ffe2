// SPDX-License-Identifier: MIT OR Apache-2.0

#![forbid(unsafe_code)]

use thiserror::Error;

/// Workspace-wide error type for the allocation engine.
///
/// The solve pipeline is infallible on well-formed inputs; every variant
/// here traces back to a malformed ingest record or an exhausted integer
/// range, never to a recoverable mid-solve condition.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MaqError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("numerical issue: {0}")]
    NumericalIssue(String),
    #[error("resource limit exceeded: {0}")]
    ResourceLimit(String),
}

impl MaqError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn numerical_issue(message: impl Into<String>) -> Self {
        Self::NumericalIssue(message.into())
    }

    pub fn resource_limit(message: impl Into<String>) -> Self {
        Self::ResourceLimit(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::MaqError;

    #[test]
    fn constructors_produce_matching_variants() {
        assert!(matches!(
            MaqError::invalid_input("bad"),
            MaqError::InvalidInput(_)
        ));
        assert!(matches!(
            MaqError::numerical_issue("nan"),
            MaqError::NumericalIssue(_)
        ));
        assert!(matches!(
            MaqError::resource_limit("overflow"),
            MaqError::ResourceLimit(_)
        ));
    }

    #[test]
    fn display_messages_carry_lowercase_prefixes() {
        assert_eq!(
            MaqError::invalid_input("list_offsets is empty").to_string(),
            "invalid input: list_offsets is empty"
        );
        assert_eq!(
            MaqError::resource_limit("treatment id space exhausted").to_string(),
            "resource limit exceeded: treatment id space exhausted"
        );
        assert_eq!(
            MaqError::numerical_issue("non-finite priority").to_string(),
            "numerical issue: non-finite priority"
        );
    }

    #[test]
    fn errors_are_comparable_for_test_assertions() {
        assert_eq!(
            MaqError::invalid_input("x"),
            MaqError::InvalidInput("x".to_string())
        );
        assert_ne!(
            MaqError::invalid_input("x"),
            MaqError::numerical_issue("x")
        );
    }
}
