// 📏 Febraban Layout Tables
// Field name → (offset, width) for both boleto representations
//
// The digit string is the single source of truth: segments are always sliced
// out of it through these tables, never stored on their own.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    BankCode,
    CurrencyCode,
    /// General check digit (Modulo-11 over the other 43 barcode digits)
    CheckDigit,
    DueDateFactor,
    /// Amount in cents
    Value,
    /// 25-digit bank-defined field (barcode only)
    FreeField,
    FreeFieldPart1,
    Block1CheckDigit,
    FreeFieldPart2,
    Block2CheckDigit,
    FreeFieldPart3,
    Block3CheckDigit,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::BankCode => "bank code",
            Field::CurrencyCode => "currency code",
            Field::CheckDigit => "general check digit",
            Field::DueDateFactor => "due date factor",
            Field::Value => "value",
            Field::FreeField => "free field",
            Field::FreeFieldPart1 => "free field (part 1)",
            Field::Block1CheckDigit => "block 1 check digit",
            Field::FreeFieldPart2 => "free field (part 2)",
            Field::Block2CheckDigit => "block 2 check digit",
            Field::FreeFieldPart3 => "free field (part 3)",
            Field::Block3CheckDigit => "block 3 check digit",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: Field,
    pub offset: usize,
    pub width: usize,
}

impl FieldSpec {
    const fn new(field: Field, offset: usize, width: usize) -> Self {
        FieldSpec { field, offset, width }
    }

    pub fn end(&self) -> usize {
        self.offset + self.width
    }
}

// ============================================================================
// LAYOUT TABLES
// ============================================================================

pub const BARCODE_LEN: usize = 44;
pub const LINHA_DIGITAVEL_LEN: usize = 47;

/// 44-digit barcode payload
pub const BARCODE_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new(Field::BankCode, 0, 3),
    FieldSpec::new(Field::CurrencyCode, 3, 1),
    FieldSpec::new(Field::CheckDigit, 4, 1),
    FieldSpec::new(Field::DueDateFactor, 5, 4),
    FieldSpec::new(Field::Value, 9, 10),
    FieldSpec::new(Field::FreeField, 19, 25),
];

/// 47-digit linha digitável
pub const LINHA_DIGITAVEL_LAYOUT: &[FieldSpec] = &[
    FieldSpec::new(Field::BankCode, 0, 3),
    FieldSpec::new(Field::CurrencyCode, 3, 1),
    FieldSpec::new(Field::FreeFieldPart1, 4, 5),
    FieldSpec::new(Field::Block1CheckDigit, 9, 1),
    FieldSpec::new(Field::FreeFieldPart2, 10, 10),
    FieldSpec::new(Field::Block2CheckDigit, 20, 1),
    FieldSpec::new(Field::FreeFieldPart3, 21, 10),
    FieldSpec::new(Field::Block3CheckDigit, 31, 1),
    FieldSpec::new(Field::CheckDigit, 32, 1),
    FieldSpec::new(Field::DueDateFactor, 33, 4),
    FieldSpec::new(Field::Value, 37, 10),
];

/// A Modulo-10 protected block of the linha digitável
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckedBlock {
    pub offset: usize,
    pub width: usize,
    pub check_digit: Field,
}

impl CheckedBlock {
    /// Position of the block's check digit (right after its data)
    pub fn check_digit_offset(&self) -> usize {
        self.offset + self.width
    }
}

pub const LINHA_BLOCKS: [CheckedBlock; 3] = [
    CheckedBlock { offset: 0, width: 9, check_digit: Field::Block1CheckDigit },
    CheckedBlock { offset: 10, width: 10, check_digit: Field::Block2CheckDigit },
    CheckedBlock { offset: 21, width: 10, check_digit: Field::Block3CheckDigit },
];

/// Where a run of barcode digits lands in the linha digitável
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentMove {
    pub barcode_offset: usize,
    pub linha_offset: usize,
    pub width: usize,
}

/// Every barcode digit appears exactly once; the three block check digits
/// are the only linha positions not covered.
pub const SEGMENT_MAP: [SegmentMove; 6] = [
    // bank + currency
    SegmentMove { barcode_offset: 0, linha_offset: 0, width: 4 },
    // free field, split over the three blocks
    SegmentMove { barcode_offset: 19, linha_offset: 4, width: 5 },
    SegmentMove { barcode_offset: 24, linha_offset: 10, width: 10 },
    SegmentMove { barcode_offset: 34, linha_offset: 21, width: 10 },
    // general check digit
    SegmentMove { barcode_offset: 4, linha_offset: 32, width: 1 },
    // due date factor + value
    SegmentMove { barcode_offset: 5, linha_offset: 33, width: 14 },
];

// ============================================================================
// LAYOUT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    Barcode,
    LinhaDigitavel,
}

impl Layout {
    /// Detect the layout from a digit count
    pub fn from_len(len: usize) -> Option<Layout> {
        match len {
            BARCODE_LEN => Some(Layout::Barcode),
            LINHA_DIGITAVEL_LEN => Some(Layout::LinhaDigitavel),
            _ => None,
        }
    }

    pub fn digit_count(&self) -> usize {
        match self {
            Layout::Barcode => BARCODE_LEN,
            Layout::LinhaDigitavel => LINHA_DIGITAVEL_LEN,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Barcode => "barcode",
            Layout::LinhaDigitavel => "linha digitável",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            Layout::Barcode => BARCODE_LAYOUT,
            Layout::LinhaDigitavel => LINHA_DIGITAVEL_LAYOUT,
        }
    }

    pub fn spec(&self, field: Field) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|spec| spec.field == field)
    }

    /// Slice a field out of `digits`; `None` if the field is absent from this
    /// layout or `digits` is too short.
    pub fn segment<'a>(&self, digits: &'a str, field: Field) -> Option<&'a str> {
        let spec = self.spec(field)?;
        digits.get(spec.offset..spec.end())
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn covers_exactly(layout: &[FieldSpec], len: usize) -> bool {
        let mut covered = vec![false; len];
        for spec in layout {
            for slot in &mut covered[spec.offset..spec.end()] {
                if *slot {
                    return false;
                }
                *slot = true;
            }
        }
        covered.iter().all(|c| *c)
    }

    #[test]
    fn test_layouts_tile_their_length() {
        assert!(covers_exactly(BARCODE_LAYOUT, BARCODE_LEN));
        assert!(covers_exactly(LINHA_DIGITAVEL_LAYOUT, LINHA_DIGITAVEL_LEN));
    }

    #[test]
    fn test_segment_map_covers_barcode_once() {
        let mut seen = [0u8; BARCODE_LEN];
        for mv in SEGMENT_MAP {
            for slot in &mut seen[mv.barcode_offset..mv.barcode_offset + mv.width] {
                *slot += 1;
            }
        }
        assert!(seen.iter().all(|count| *count == 1));
    }

    #[test]
    fn test_blocks_match_linha_layout() {
        for block in LINHA_BLOCKS {
            let spec = Layout::LinhaDigitavel.spec(block.check_digit).unwrap();
            assert_eq!(spec.offset, block.check_digit_offset());
            assert_eq!(spec.width, 1);
        }
    }

    #[test]
    fn test_segment_extraction() {
        let barcode = "19797116900000386000000004572849356277103564";
        assert_eq!(Layout::Barcode.segment(barcode, Field::BankCode), Some("197"));
        assert_eq!(Layout::Barcode.segment(barcode, Field::CheckDigit), Some("7"));
        assert_eq!(Layout::Barcode.segment(barcode, Field::DueDateFactor), Some("1169"));
        assert_eq!(Layout::Barcode.segment(barcode, Field::Value), Some("0000038600"));
        assert_eq!(
            Layout::Barcode.segment(barcode, Field::FreeField),
            Some("0000004572849356277103564")
        );
        assert_eq!(Layout::Barcode.segment(barcode, Field::Block1CheckDigit), None);

        let linha = "19790000050457284935662771035649711690000038600";
        assert_eq!(Layout::LinhaDigitavel.segment(linha, Field::CheckDigit), Some("7"));
        assert_eq!(Layout::LinhaDigitavel.segment(linha, Field::Block3CheckDigit), Some("9"));
        assert_eq!(Layout::LinhaDigitavel.segment(linha, Field::Value), Some("0000038600"));
    }

    #[test]
    fn test_layout_from_len() {
        assert_eq!(Layout::from_len(44), Some(Layout::Barcode));
        assert_eq!(Layout::from_len(47), Some(Layout::LinhaDigitavel));
        assert_eq!(Layout::from_len(48), None);
        assert_eq!(Layout::LinhaDigitavel.digit_count(), 47);
    }
}
