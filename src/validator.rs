// 🔍 Validator - non-fail-fast checks over a boleto candidate
//
// Every check runs and every failure is reported, so a caller can explain
// why a string was rejected. Critical issues invalidate the candidate;
// warnings (unknown bank, unusual currency) only lower confidence.

use crate::converter::{
    block_check_digit_errors, linha_to_barcode_bytes, reject_collection_slip, to_barcode_array,
    verify_barcode_check_digit,
};
use crate::digits::DigitString;
use crate::entities::bank::{BankCode, BankRegistry};
use crate::error::{BoletoError, IssueKind};
use crate::layout::{Field, Layout, LINHA_BLOCKS, LINHA_DIGITAVEL_LEN};
use serde::{Deserialize, Serialize};

/// Currency code for the Brazilian real
const CURRENCY_REAL: u8 = 9;

// ============================================================================
// VALIDATION ISSUE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Critical, // Candidate is not a usable boleto number
    Warning,  // Candidate is usable but something looks unusual
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,
    pub severity: Severity,
    pub field: Option<Field>,
    pub message: String,
}

impl ValidationIssue {
    pub fn critical(error: &BoletoError) -> Self {
        Self::from_error(error, Severity::Critical)
    }

    pub fn warning(error: &BoletoError) -> Self {
        Self::from_error(error, Severity::Warning)
    }

    fn from_error(error: &BoletoError, severity: Severity) -> Self {
        ValidationIssue {
            kind: error.kind(),
            severity,
            field: error.field(),
            message: error.to_string(),
        }
    }
}

// ============================================================================
// VALIDATION REPORT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub candidate: String,
    pub layout: Option<Layout>,
    pub issues: Vec<ValidationIssue>,
    pub passed_count: usize,
    pub failed_count: usize,
}

impl ValidationReport {
    fn new(candidate: &str) -> Self {
        ValidationReport {
            candidate: candidate.to_string(),
            layout: None,
            issues: Vec::new(),
            passed_count: 0,
            failed_count: 0,
        }
    }

    fn pass(&mut self) {
        self.passed_count += 1;
    }

    fn fail(&mut self, issue: ValidationIssue) {
        self.failed_count += 1;
        self.issues.push(issue);
    }

    /// Record the outcome of one check
    fn check(&mut self, outcome: Result<(), BoletoError>, severity: Severity) {
        match outcome {
            Ok(()) => self.pass(),
            Err(e) => self.fail(ValidationIssue::from_error(&e, severity)),
        }
    }

    /// True iff no critical issue was found (warnings are allowed)
    pub fn is_valid(&self) -> bool {
        !self.has_critical_issues()
    }

    pub fn has_critical_issues(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Critical)
    }

    pub fn has_warnings(&self) -> bool {
        self.issues.iter().any(|i| i.severity == Severity::Warning)
    }

    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }

    pub fn critical_issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Critical)
    }

    pub fn summary(&self) -> String {
        let layout = self.layout.map(|l| l.name()).unwrap_or("unknown layout");
        if self.issues.is_empty() {
            return format!(
                "{} ({}): valid, {} checks passed",
                self.candidate, layout, self.passed_count
            );
        }

        let messages: Vec<&str> = self.issues.iter().map(|i| i.message.as_str()).collect();
        format!(
            "{} ({}): {} | {}",
            self.candidate,
            layout,
            if self.is_valid() { "valid with warnings" } else { "invalid" },
            messages.join("; ")
        )
    }
}

// ============================================================================
// VALIDATOR
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct Validator {
    banks: BankRegistry,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(banks: BankRegistry) -> Self {
        Validator { banks }
    }

    /// Validate a candidate and report every failed check
    pub fn validate(&self, candidate: &str) -> ValidationReport {
        let mut report = ValidationReport::new(candidate);

        // Rule 1: digits only
        let parsed = DigitString::parse(candidate);
        let digits = match parsed {
            Ok(digits) => {
                report.pass();
                Some(digits)
            }
            Err(e) => {
                report.fail(ValidationIssue::critical(&e));
                None
            }
        };

        // Rule 2: boleto length
        let length = candidate.chars().count();
        report.layout = Layout::from_len(length);
        if report.layout.is_some() {
            report.pass();
        } else {
            report.fail(ValidationIssue::critical(&BoletoError::InvalidLength {
                expected: "44 or 47",
                actual: length,
            }));
        }

        let (Some(digits), Some(layout)) = (digits, report.layout) else {
            return report;
        };

        // Rule 3: known bank (advisory)
        self.check_bank_code(&digits, &mut report);

        // Rule 4: currency (advisory)
        let currency = digits.digit(3).unwrap_or_default();
        report.check(
            if currency == CURRENCY_REAL {
                Ok(())
            } else {
                Err(BoletoError::UnknownCurrencyCode(currency))
            },
            Severity::Warning,
        );

        // Rule 5: bank boleto, not a collection slip
        let segment = reject_collection_slip(&digits);
        let collection_barcode = segment.is_err() && layout == Layout::Barcode;
        report.check(segment, Severity::Critical);
        if collection_barcode {
            // check digit sits elsewhere in collection barcodes
            return report;
        }

        // Rule 6: every embedded check digit
        match layout {
            Layout::Barcode => {
                let barcode = to_barcode_array(&digits);
                report.check(verify_barcode_check_digit(&barcode), Severity::Critical);
            }
            Layout::LinhaDigitavel => {
                let mut linha = [0u8; LINHA_DIGITAVEL_LEN];
                linha.copy_from_slice(digits.as_bytes());

                let block_errors = block_check_digit_errors(&linha);
                for _ in block_errors.len()..LINHA_BLOCKS.len() {
                    report.pass();
                }
                for e in &block_errors {
                    report.fail(ValidationIssue::critical(e));
                }

                let barcode = linha_to_barcode_bytes(&linha);
                report.check(verify_barcode_check_digit(&barcode), Severity::Critical);
            }
        }

        report
    }

    fn check_bank_code(&self, digits: &DigitString, report: &mut ValidationReport) {
        match BankCode::from_prefix(digits) {
            Ok(code) if self.banks.is_known(code) => report.pass(),
            Ok(code) => {
                tracing::warn!("Unknown bank code '{}' in boleto number: {}", code, digits);
                let unknown = BoletoError::UnknownBankCode(code.to_string());
                report.fail(ValidationIssue::warning(&unknown));
            }
            Err(e) => report.fail(ValidationIssue::warning(&e)),
        }
    }

    pub fn is_valid_boleto_number(&self, candidate: &str) -> bool {
        self.validate(candidate).is_valid()
    }

    pub fn validate_batch<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<ValidationReport> {
        candidates.iter().map(|c| self.validate(c.as_ref())).collect()
    }
}

// ============================================================================
// CONVENIENCE FUNCTIONS
// ============================================================================

/// Validate against the built-in bank registry
pub fn validate(candidate: &str) -> ValidationReport {
    Validator::new().validate(candidate)
}

/// True iff `candidate` has no critical issue; an unknown bank alone is fine
pub fn is_valid_boleto_number(candidate: &str) -> bool {
    validate(candidate).is_valid()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BARCODE: &str = "19797116900000386000000004572849356277103564";
    const LINHA: &str = "19790000050457284935662771035649711690000038600";
    const BB_BARCODE: &str = "00193373700000001000500940144816060680935031";

    #[test]
    fn test_validate_valid_barcode() {
        let report = validate(BARCODE);

        println!("Report: {}", report.summary());

        assert!(report.is_valid());
        assert!(report.issues.is_empty());
        assert_eq!(report.layout, Some(Layout::Barcode));
        assert_eq!(report.failed_count, 0);
        assert!(is_valid_boleto_number(BB_BARCODE));
    }

    #[test]
    fn test_validate_valid_linha() {
        let report = validate(LINHA);
        assert!(report.is_valid());
        assert!(!report.has_warnings());
        assert_eq!(report.layout, Some(Layout::LinhaDigitavel));
        // digits, length, bank, currency, segment, 3 blocks, general DV
        assert_eq!(report.passed_count, 9);
    }

    #[test]
    fn test_invalid_lengths() {
        for len in [0usize, 1, 43, 45, 46, 48, 60] {
            let candidate = "1".repeat(len);
            let report = validate(&candidate);
            assert!(report.has_issue(IssueKind::InvalidLength), "length {}", len);
            assert!(!report.is_valid());
            assert!(!is_valid_boleto_number(&candidate));
        }
    }

    #[test]
    fn test_non_digits_reports_every_failure() {
        let report = validate("abc");
        assert!(report.has_issue(IssueKind::InvalidInput));
        assert!(report.has_issue(IssueKind::InvalidLength));
        assert_eq!(report.failed_count, 2);
    }

    #[test]
    fn test_unknown_bank_is_only_a_warning() {
        let report = validate("99995100000000123451234567890123456789012345");

        println!("Report: {}", report.summary());

        assert!(report.is_valid());
        assert!(report.has_warnings());
        assert!(report.has_issue(IssueKind::UnknownBankCode));
        assert_eq!(report.issues[0].field, Some(Field::BankCode));
    }

    #[test]
    fn test_extra_bank_codes() {
        let validator = Validator::with_registry(BankRegistry::with_extra_codes(&["999"]));
        let report = validator.validate("99995100000000123451234567890123456789012345");
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_every_single_digit_mutation_detected() {
        for (pos, original) in LINHA.char_indices() {
            for replacement in '0'..='9' {
                if replacement == original {
                    continue;
                }
                let mut mutated = LINHA.to_string();
                mutated.replace_range(pos..pos + 1, &replacement.to_string());

                let report = validate(&mutated);
                assert!(
                    report.has_issue(IssueKind::ChecksumMismatch),
                    "mutation at {} to {} went unnoticed",
                    pos,
                    replacement
                );
                assert!(!report.is_valid());
            }
        }
    }

    #[test]
    fn test_barcode_mutation_detected() {
        for (pos, original) in BARCODE.char_indices() {
            let replacement = if original == '0' { '1' } else { '0' };
            let mut mutated = BARCODE.to_string();
            mutated.replace_range(pos..pos + 1, &replacement.to_string());
            assert!(!is_valid_boleto_number(&mutated), "mutation at {}", pos);
        }
    }

    #[test]
    fn test_all_block_failures_reported() {
        // zero every block check digit: 5, 6, 9 → 0
        let mut tampered = LINHA.to_string();
        for pos in [9, 20, 31] {
            tampered.replace_range(pos..pos + 1, "0");
        }

        let report = validate(&tampered);
        let fields: Vec<Option<Field>> = report
            .critical_issues()
            .map(|i| i.field)
            .collect();

        assert_eq!(
            fields,
            vec![
                Some(Field::Block1CheckDigit),
                Some(Field::Block2CheckDigit),
                Some(Field::Block3CheckDigit),
            ]
        );
    }

    #[test]
    fn test_collection_slip_rejected() {
        let report = validate("80000000000000000000000000000000000000000000");
        assert!(report.has_issue(IssueKind::UnsupportedSegment));
        assert!(!report.has_issue(IssueKind::ChecksumMismatch));
        assert!(!report.is_valid());
    }

    #[test]
    fn test_unusual_currency_warning() {
        let report = validate("00101373700000001000500940144816060680935031");
        assert!(report.has_issue(IssueKind::UnknownCurrencyCode));
    }

    #[test]
    fn test_batch_validation() {
        let validator = Validator::new();
        let reports = validator.validate_batch(&[BARCODE, LINHA, "123"]);

        assert_eq!(reports.len(), 3);
        assert!(reports[0].is_valid());
        assert!(reports[1].is_valid());
        assert!(!reports[2].is_valid());
        assert!(!reports[2].summary().is_empty());
    }
}
