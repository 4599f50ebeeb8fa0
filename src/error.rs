// ⚠️ Error Types
// Every failure the core can report, as a structured value

use crate::layout::Field;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for checksum, conversion and parsing operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoletoError {
    /// Empty input or a character outside `0-9`
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid length: expected {expected} digits, got {actual}")]
    InvalidLength { expected: &'static str, actual: usize },

    #[error("checksum mismatch in {field}: expected {expected}, found {found}")]
    ChecksumMismatch { field: Field, expected: u8, found: u8 },

    #[error("unknown bank code: {0}")]
    UnknownBankCode(String),

    #[error("unknown currency code: {0}")]
    UnknownCurrencyCode(u8),

    /// Collection slips (leading 8) use a different line layout
    #[error("unsupported boleto segment: {0}")]
    UnsupportedSegment(String),
}

impl BoletoError {
    pub fn kind(&self) -> IssueKind {
        match self {
            BoletoError::InvalidInput(_) => IssueKind::InvalidInput,
            BoletoError::InvalidLength { .. } => IssueKind::InvalidLength,
            BoletoError::ChecksumMismatch { .. } => IssueKind::ChecksumMismatch,
            BoletoError::UnknownBankCode(_) => IssueKind::UnknownBankCode,
            BoletoError::UnknownCurrencyCode(_) => IssueKind::UnknownCurrencyCode,
            BoletoError::UnsupportedSegment(_) => IssueKind::UnsupportedSegment,
        }
    }

    /// Field the error points at, when it concerns a single segment
    pub fn field(&self) -> Option<Field> {
        match self {
            BoletoError::ChecksumMismatch { field, .. } => Some(*field),
            BoletoError::UnknownBankCode(_) => Some(Field::BankCode),
            BoletoError::UnknownCurrencyCode(_) => Some(Field::CurrencyCode),
            _ => None,
        }
    }
}

/// Serializable discriminant of [`BoletoError`], used in validation reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    InvalidInput,
    InvalidLength,
    ChecksumMismatch,
    UnknownBankCode,
    UnknownCurrencyCode,
    UnsupportedSegment,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::InvalidInput => "InvalidInput",
            IssueKind::InvalidLength => "InvalidLength",
            IssueKind::ChecksumMismatch => "ChecksumMismatch",
            IssueKind::UnknownBankCode => "UnknownBankCode",
            IssueKind::UnknownCurrencyCode => "UnknownCurrencyCode",
            IssueKind::UnsupportedSegment => "UnsupportedSegment",
        }
    }
}

/// Alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BoletoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BoletoError::InvalidLength {
            expected: "44 or 47",
            actual: 12,
        };
        assert_eq!(err.to_string(), "invalid length: expected 44 or 47 digits, got 12");

        let err = BoletoError::ChecksumMismatch {
            field: Field::CheckDigit,
            expected: 7,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "checksum mismatch in general check digit: expected 7, found 3"
        );
    }

    #[test]
    fn test_error_kind_and_field() {
        let err = BoletoError::UnknownBankCode("999".to_string());
        assert_eq!(err.kind(), IssueKind::UnknownBankCode);
        assert_eq!(err.field(), Some(Field::BankCode));

        let err = BoletoError::InvalidInput("empty digit sequence".to_string());
        assert_eq!(err.kind().as_str(), "InvalidInput");
        assert_eq!(err.field(), None);
    }
}
