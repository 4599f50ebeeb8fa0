// 🧾 Boleto Entity - decoded view over a validated payment code
//
// Holds both representations (they are derived from each other) and slices
// every other value out of them through the layout tables.

use crate::converter::{barcode_to_linha_digitavel, linha_digitavel_to_barcode};
use crate::digits::DigitString;
use crate::entities::bank::BankCode;
use crate::error::{BoletoError, Result};
use crate::layout::{Field, Layout};
use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;

// ============================================================================
// DUE DATE FACTOR
// ============================================================================

/// Factor 1000 fell on 2000-07-03 counted from this base
fn first_cycle_base() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(1997, 10, 7)
}

/// Factor 9999 was 2025-02-21; the factor restarted at 1000 on 2025-02-22
fn second_cycle_base() -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(2022, 5, 29)
}

/// Resolve a due-date factor to a calendar date
///
/// A factor is ambiguous across the 2025 restart, so the cycle whose date is
/// closest to `reference` wins. Factor 0 means the boleto has no due date.
pub fn due_date_from_factor(factor: u16, reference: NaiveDate) -> Option<NaiveDate> {
    if factor == 0 {
        return None;
    }

    let first = first_cycle_base()?.checked_add_days(Days::new(factor as u64));
    let second = if factor >= 1000 {
        second_cycle_base()?.checked_add_days(Days::new(factor as u64))
    } else {
        None
    };

    let distance = |date: NaiveDate| (date - reference).num_days().abs();
    match (first, second) {
        (Some(a), Some(b)) => Some(if distance(b) < distance(a) { b } else { a }),
        (a, b) => a.or(b),
    }
}

/// "R$ 1.234,56" from an amount in cents
pub fn format_amount(cents: u64) -> String {
    let reais = (cents / 100).to_string();
    let mut grouped = String::with_capacity(reais.len() + reais.len() / 3);
    for (i, ch) in reais.chars().enumerate() {
        if i > 0 && (reais.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("R$ {},{:02}", grouped, cents % 100)
}

// ============================================================================
// BOLETO
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Boleto {
    barcode: DigitString,
    linha_digitavel: DigitString,
    bank_code: BankCode,
}

impl Boleto {
    /// Accept either a 44-digit barcode or a 47-digit linha digitável
    pub fn parse(candidate: &str) -> Result<Self> {
        let digits = DigitString::normalize(candidate)?;
        match digits.layout() {
            Some(Layout::Barcode) => Self::from_barcode(&digits),
            Some(Layout::LinhaDigitavel) => Self::from_linha_digitavel(&digits),
            None => Err(BoletoError::InvalidLength {
                expected: "44 or 47",
                actual: digits.len(),
            }),
        }
    }

    pub fn from_barcode(barcode: &str) -> Result<Self> {
        let linha_digitavel = barcode_to_linha_digitavel(barcode)?;
        Ok(Boleto {
            bank_code: BankCode::from_prefix(barcode)?,
            barcode: DigitString::parse(barcode)?,
            linha_digitavel,
        })
    }

    pub fn from_linha_digitavel(linha: &str) -> Result<Self> {
        let barcode = linha_digitavel_to_barcode(linha)?;
        Ok(Boleto {
            bank_code: BankCode::from_prefix(linha)?,
            barcode,
            linha_digitavel: DigitString::parse(linha)?,
        })
    }

    pub fn barcode(&self) -> &DigitString {
        &self.barcode
    }

    pub fn linha_digitavel(&self) -> &DigitString {
        &self.linha_digitavel
    }

    /// Slice a field from whichever representation carries it
    pub fn segment(&self, field: Field) -> Option<&str> {
        Layout::Barcode
            .segment(&self.barcode, field)
            .or_else(|| Layout::LinhaDigitavel.segment(&self.linha_digitavel, field))
    }

    fn numeric(&self, field: Field) -> u64 {
        self.segment(field)
            .map(|s| s.bytes().fold(0u64, |acc, b| acc * 10 + (b - b'0') as u64))
            .unwrap_or(0)
    }

    pub fn bank_code(&self) -> BankCode {
        self.bank_code
    }

    pub fn bank_name(&self) -> Option<&'static str> {
        self.bank_code().bank().map(|bank| bank.name)
    }

    /// 9 = Brazilian real
    pub fn currency_code(&self) -> u8 {
        self.numeric(Field::CurrencyCode) as u8
    }

    pub fn check_digit(&self) -> u8 {
        self.numeric(Field::CheckDigit) as u8
    }

    pub fn due_date_factor(&self) -> u16 {
        self.numeric(Field::DueDateFactor) as u16
    }

    pub fn due_date(&self, reference: NaiveDate) -> Option<NaiveDate> {
        due_date_from_factor(self.due_date_factor(), reference)
    }

    /// Due date resolved against today (UTC)
    pub fn current_due_date(&self) -> Option<NaiveDate> {
        self.due_date(Utc::now().date_naive())
    }

    pub fn amount_cents(&self) -> u64 {
        self.numeric(Field::Value)
    }

    pub fn free_field(&self) -> &str {
        self.segment(Field::FreeField).unwrap_or_default()
    }

    pub fn details(&self, reference: NaiveDate) -> BoletoDetails {
        BoletoDetails {
            linha_digitavel: self.linha_digitavel.clone(),
            barcode: self.barcode.clone(),
            bank_code: self.bank_code(),
            bank_name: self.bank_name(),
            currency_code: self.currency_code(),
            due_date: self.due_date(reference),
            amount_cents: self.amount_cents(),
            amount: format_amount(self.amount_cents()),
            free_field: self.free_field().to_string(),
        }
    }
}

/// Serializable summary of a boleto
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoletoDetails {
    pub linha_digitavel: DigitString,
    pub barcode: DigitString,
    pub bank_code: BankCode,
    pub bank_name: Option<&'static str>,
    pub currency_code: u8,
    pub due_date: Option<NaiveDate>,
    pub amount_cents: u64,
    pub amount: String,
    pub free_field: String,
}

// ============================================================================
// TESTS
// ============================================================================
