//! The message/severity protocol emitted by mutation handlers.

use serde::{Deserialize, Serialize};

/// Severity of a [`CalculationMessage`]. `Critical` halts evaluation;
/// `Warning` is recorded and evaluation continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Critical,
    Warning,
}

/// Stable, test-suite-visible identifiers for every business condition the
/// core can emit. Serialized as `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageCode {
    DossierAlreadyExists,
    InvalidName,
    InvalidBirthDate,
    DossierNotFound,
    InvalidSalary,
    InvalidPartTimeFactor,
    DuplicatePolicy,
    NoPolicies,
    NoMatchingPolicies,
    NegativeSalaryClamped,
    NoParticipant,
    RetirementBeforeEmployment,
    NotEligible,
    UnknownMutation,
}

/// A single structured record produced while evaluating a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationMessage {
    pub code: MessageCode,
    pub severity: Severity,
    pub message: String,
}

impl CalculationMessage {
    pub fn critical(code: MessageCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Critical,
            message: message.into(),
        }
    }

    pub fn warning(code: MessageCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn code_serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&MessageCode::DossierAlreadyExists).unwrap();
        assert_eq!(json, "\"DOSSIER_ALREADY_EXISTS\"");
    }

    #[test]
    fn critical_helper_sets_severity() {
        let msg = CalculationMessage::critical(MessageCode::NoPolicies, "no policies");
        assert!(msg.is_critical());
    }

    #[test]
    fn warning_helper_sets_severity() {
        let msg = CalculationMessage::warning(MessageCode::DuplicatePolicy, "duplicate");
        assert!(!msg.is_critical());
    }
}
