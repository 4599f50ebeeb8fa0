// 🏦 Bank Entity - febraban institution codes
//
// The first three digits of every boleto identify the issuing bank.
// Membership in the registry is advisory: an unknown code is flagged,
// never rejected, since new institutions get codes all the time.

use crate::error::{BoletoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// BANK CODE
// ============================================================================

/// 3-digit bank code, 000-999
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BankCode(u16);

impl BankCode {
    /// Parse exactly three ASCII digits
    pub fn parse(code: &str) -> Result<Self> {
        if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
            return Err(BoletoError::InvalidInput(format!(
                "bank code must be 3 digits, got {:?}",
                code
            )));
        }

        let value = code
            .bytes()
            .fold(0u16, |acc, b| acc * 10 + (b - b'0') as u16);
        Ok(BankCode(value))
    }

    /// Bank code at the start of a barcode or linha digitável
    pub fn from_prefix(digits: &str) -> Result<Self> {
        let prefix = digits.get(..3).ok_or_else(|| {
            BoletoError::InvalidInput(format!("too short for a bank code: {:?}", digits))
        })?;
        Self::parse(prefix)
    }

    pub fn value(&self) -> u16 {
        self.0
    }

    pub fn bank(&self) -> Option<&'static Bank> {
        KNOWN_BANKS.iter().find(|bank| bank.code == self.0)
    }

    pub fn is_known(&self) -> bool {
        self.bank().is_some()
    }
}

impl fmt::Display for BankCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03}", self.0)
    }
}

impl TryFrom<String> for BankCode {
    type Error = BoletoError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<BankCode> for String {
    fn from(value: BankCode) -> Self {
        value.to_string()
    }
}

// ============================================================================
// BANK REGISTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bank {
    pub code: u16,
    /// Commonly used name
    pub name: &'static str,
}

/// Institutions recognized without configuration
pub const KNOWN_BANKS: &[Bank] = &[
    Bank { code: 1, name: "Banco do Brasil" },
    Bank { code: 4, name: "Banco do Nordeste" },
    Bank { code: 21, name: "Banestes" },
    Bank { code: 25, name: "Banco Alfa" },
    Bank { code: 33, name: "Santander" },
    Bank { code: 77, name: "Banco Inter" },
    Bank { code: 85, name: "Ailos" },
    Bank { code: 97, name: "Credisis" },
    Bank { code: 104, name: "Caixa Econômica Federal" },
    Bank { code: 197, name: "Stone" },
    Bank { code: 212, name: "Banco Original" },
    Bank { code: 237, name: "Bradesco" },
    Bank { code: 318, name: "Banco BMG" },
    Bank { code: 341, name: "Itaú Unibanco" },
    Bank { code: 356, name: "Banco Real" },
    Bank { code: 389, name: "Banco Mercantil do Brasil" },
    Bank { code: 422, name: "Banco Safra" },
    Bank { code: 633, name: "Banco Rendimento" },
    Bank { code: 745, name: "Citibank" },
    Bank { code: 756, name: "Sicoob" },
];

/// Built-in banks plus any extra codes a deployment recognizes
#[derive(Debug, Clone, Default)]
pub struct BankRegistry {
    extra_codes: Vec<BankCode>,
}

impl BankRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that also accepts `codes`; malformed entries are skipped
    pub fn with_extra_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut registry = Self::new();
        for code in codes {
            match BankCode::parse(code.as_ref().trim()) {
                Ok(code) => registry.register(code),
                Err(e) => tracing::warn!("ignoring extra bank code: {}", e),
            }
        }
        registry
    }

    pub fn register(&mut self, code: BankCode) {
        if !self.extra_codes.contains(&code) {
            self.extra_codes.push(code);
        }
    }

    pub fn is_known(&self, code: BankCode) -> bool {
        code.is_known() || self.extra_codes.contains(&code)
    }

    /// Name for a code, when it is one of the built-in banks
    pub fn name(&self, code: BankCode) -> Option<&'static str> {
        code.bank().map(|bank| bank.name)
    }

    pub fn count(&self) -> usize {
        KNOWN_BANKS.len()
            + self
                .extra_codes
                .iter()
                .filter(|code| !code.is_known())
                .count()
    }
}

// ============================================================================
// TESTS
// ============================================================================
