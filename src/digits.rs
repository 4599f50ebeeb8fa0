// 🔢 DigitString - immutable run of ASCII digits
//
// Created by the scanner (or a caller) from raw text, consumed by the
// validator and converter, then dropped. No separators survive parsing.

use crate::error::{BoletoError, Result};
use crate::layout::Layout;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Separators commonly printed inside a linha digitável or barcode number
pub fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == '.' || ch == '-'
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitString(String);

impl DigitString {
    /// Parse a digit-only string. Fails on empty input or any non-digit.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(BoletoError::InvalidInput("empty digit sequence".to_string()));
        }

        if let Some((pos, ch)) = s.char_indices().find(|(_, c)| !c.is_ascii_digit()) {
            return Err(BoletoError::InvalidInput(format!(
                "non-digit character {:?} at position {}",
                ch, pos
            )));
        }

        Ok(DigitString(s.to_string()))
    }

    /// Strip separators (spaces, dots, dashes) and parse what remains
    ///
    /// "23793.38128 60000.000003" → "2379338128600000000003"
    pub fn normalize(s: &str) -> Result<Self> {
        let cleaned: String = s.chars().filter(|c| !is_separator(*c)).collect();
        Self::parse(&cleaned)
    }

    /// Build from bytes already known to be ASCII digits
    pub(crate) fn from_ascii_digits(bytes: &[u8]) -> Self {
        debug_assert!(!bytes.is_empty() && bytes.iter().all(u8::is_ascii_digit));
        DigitString(bytes.iter().map(|b| *b as char).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Layout implied by the length, if it is a boleto length
    pub fn layout(&self) -> Option<Layout> {
        Layout::from_len(self.0.len())
    }

    /// Numeric value (0-9) of the digit at `index`
    pub fn digit(&self, index: usize) -> Option<u8> {
        self.0.as_bytes().get(index).map(|b| b - b'0')
    }

    /// Fails with `InvalidLength` unless this string has the layout's length
    pub fn expect_layout(&self, layout: Layout) -> Result<()> {
        if self.0.len() == layout.digit_count() {
            Ok(())
        } else {
            Err(BoletoError::InvalidLength {
                expected: match layout {
                    Layout::Barcode => "44",
                    Layout::LinhaDigitavel => "47",
                },
                actual: self.0.len(),
            })
        }
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for DigitString {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DigitString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DigitString {
    type Error = BoletoError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<DigitString> for String {
    fn from(value: DigitString) -> Self {
        value.0
    }
}

impl PartialEq<str> for DigitString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DigitString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let digits = DigitString::parse("00193373700000001000500940144816060680935031").unwrap();
        assert_eq!(digits.len(), 44);
        assert_eq!(digits.layout(), Some(Layout::Barcode));
        assert_eq!(digits.digit(2), Some(1));
        assert_eq!(digits.digit(44), None);
    }

    #[test]
    fn test_parse_rejects_empty_and_letters() {
        assert!(matches!(DigitString::parse(""), Err(BoletoError::InvalidInput(_))));

        let err = DigitString::parse("12a4").unwrap_err();
        assert_eq!(
            err,
            BoletoError::InvalidInput("non-digit character 'a' at position 2".to_string())
        );
    }

    #[test]
    fn test_normalize_strips_separators() {
        let digits = DigitString::normalize("19790.00005 04572.849356\t62771-035649").unwrap();
        assert_eq!(digits, "19790000050457284935662771035649");
        assert!(DigitString::normalize(" . - ").is_err());
    }

    #[test]
    fn test_expect_layout() {
        let digits = DigitString::parse("123").unwrap();
        assert_eq!(digits.layout(), None);
        assert_eq!(
            digits.expect_layout(Layout::Barcode),
            Err(BoletoError::InvalidLength { expected: "44", actual: 3 })
        );
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let json = serde_json::to_string(&DigitString::parse("0123").unwrap()).unwrap();
        assert_eq!(json, "\"0123\"");

        let back: DigitString = serde_json::from_str(&json).unwrap();
        assert_eq!(back, "0123");

        assert!(serde_json::from_str::<DigitString>("\"12x\"").is_err());
    }
}
