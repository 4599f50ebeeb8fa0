// ✅ Checksum Algorithms - Modulo-10 and Modulo-11
// Weighted sums over digit sequences, always weighted from the rightmost digit
//
// Public functions accept raw strings and reject empty / non-digit input.
// The `*_digits` variants work on digit values (0-9) the crate has already
// validated and are used by the converter and validator.

use crate::digits::DigitString;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How a Modulo-11 remainder maps to a check digit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Modulo11Rule {
    /// Bank boleto general check digit: remainders 0, 1 and 10 give 1
    #[default]
    Febraban,
    /// Collection-style fields: remainders 0 and 1 give 0, 10 gives 1
    Collection,
}

impl Modulo11Rule {
    /// Remainders above 10 are reduced mod 11 first
    pub fn check_digit(&self, remainder: u32) -> u8 {
        match (self, remainder % 11) {
            (Modulo11Rule::Febraban, 0 | 1 | 10) => 1,
            (Modulo11Rule::Collection, 0 | 1) => 0,
            (_, r) => (11 - r) as u8,
        }
    }
}

// ============================================================================
// MODULO 10
// ============================================================================

/// Modulo-10 check digit of a digit string
///
/// Weights alternate 2, 1, 2, 1... from the right; two-digit products are
/// cross-summed (12 → 3).
pub fn modulo10(digits: &str) -> Result<u8> {
    let digits = DigitString::parse(digits)?;
    Ok(modulo10_digits(digits.bytes().map(|b| b - b'0')))
}

pub fn modulo10_digits<I>(digits: I) -> u8
where
    I: DoubleEndedIterator<Item = u8>,
{
    let sum: u32 = digits
        .rev()
        .zip([2u32, 1].into_iter().cycle())
        .map(|(digit, weight)| {
            let product = digit as u32 * weight;
            if product > 9 {
                product / 10 + product % 10
            } else {
                product
            }
        })
        .sum();

    ((10 - sum % 10) % 10) as u8
}

// ============================================================================
// MODULO 11
// ============================================================================

/// Modulo-11 check digit with the febraban bank rule
pub fn modulo11(digits: &str) -> Result<u8> {
    modulo11_with_rule(digits, Modulo11Rule::Febraban)
}

pub fn modulo11_with_rule(digits: &str, rule: Modulo11Rule) -> Result<u8> {
    let digits = DigitString::parse(digits)?;
    Ok(modulo11_digits(digits.bytes().map(|b| b - b'0'), rule))
}

/// Remainder of the 2..9 cyclic weighted sum
pub fn modulo11_remainder<I>(digits: I) -> u32
where
    I: DoubleEndedIterator<Item = u8>,
{
    let sum: u32 = digits
        .rev()
        .zip((2u32..=9).cycle())
        .map(|(digit, weight)| digit as u32 * weight)
        .sum();

    sum % 11
}

pub fn modulo11_digits<I>(digits: I, rule: Modulo11Rule) -> u8
where
    I: DoubleEndedIterator<Item = u8>,
{
    rule.check_digit(modulo11_remainder(digits))
}

// ============================================================================
// TESTS
// ============================================================================
