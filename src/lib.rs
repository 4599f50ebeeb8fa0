// Boleto Extractor - Core Library
// Exposes all modules for use in the CLI, benchmarks, and tests

pub mod error;      // Error kinds shared by every operation
pub mod layout;     // Field tables for the 44 and 47 digit layouts
pub mod digits;     // Digit-only string type and input normalization
pub mod checksum;   // Modulo-10 / Modulo-11 check digits
pub mod converter;  // Barcode ⇄ linha digitável
pub mod validator;  // Non-fail-fast validation reports
pub mod scanner;    // Candidate discovery in free text
pub mod format;     // Display styles
pub mod config;     // Extractor configuration (JSON / env)
pub mod extractor;  // Extraction pipeline
pub mod entities;   // Bank and Boleto models

// Re-export commonly used types
pub use error::{BoletoError, IssueKind, Result};
pub use layout::{Field, FieldSpec, Layout, BARCODE_LEN, LINHA_DIGITAVEL_LEN};
pub use digits::DigitString;
pub use checksum::{modulo10, modulo11, modulo11_with_rule, Modulo11Rule};
pub use converter::{barcode_to_linha_digitavel, linha_digitavel_to_barcode, to_linha_digitavel};
pub use validator::{
    is_valid_boleto_number, validate, Severity, ValidationIssue, ValidationReport, Validator,
};
pub use scanner::{find_candidates, find_candidates_in_payloads, Candidates};
pub use format::{format_boleto_number, DisplayStyle};
pub use config::ExtractorConfig;
pub use extractor::{BoletoExtractor, ExtractionOutcome};
pub use entities::{Bank, BankCode, BankRegistry, Boleto, BoletoDetails};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
