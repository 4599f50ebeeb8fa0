// 🔁 Barcode Converter - 44-digit barcode ⇄ 47-digit linha digitável
//
// Both directions are pure functions driven by the layout tables:
//   barcode → linha: move segments, insert three Modulo-10 block digits
//   linha → barcode: verify block digits, move segments back
// The general check digit travels unchanged and is verified on the way.

use crate::checksum::{modulo10_digits, modulo11_digits, Modulo11Rule};
use crate::digits::DigitString;
use crate::error::{BoletoError, Result};
use crate::layout::{
    Field, Layout, BARCODE_LEN, LINHA_BLOCKS, LINHA_DIGITAVEL_LEN, SEGMENT_MAP,
};

/// Position of the general check digit inside the barcode
const BARCODE_CHECK_DIGIT: usize = 4;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Convert a 44-digit barcode payload into its 47-digit linha digitável
///
/// # Errors
/// * `InvalidInput` - empty or non-digit input
/// * `InvalidLength` - not 44 digits
/// * `UnsupportedSegment` - collection slip (leading 8)
/// * `ChecksumMismatch` - general check digit disagrees with the other 43 digits
pub fn barcode_to_linha_digitavel(barcode: &str) -> Result<DigitString> {
    let digits = DigitString::parse(barcode)?;
    digits.expect_layout(Layout::Barcode)?;
    reject_collection_slip(&digits)?;

    let bytes = to_barcode_array(&digits);
    verify_barcode_check_digit(&bytes)?;

    Ok(DigitString::from_ascii_digits(&barcode_to_linha_bytes(&bytes)))
}

/// Convert a 47-digit linha digitável back into the 44-digit barcode payload
///
/// Block check digits are verified and stripped; a wrong digit is reported,
/// never repaired.
pub fn linha_digitavel_to_barcode(linha: &str) -> Result<DigitString> {
    let digits = DigitString::parse(linha)?;
    digits.expect_layout(Layout::LinhaDigitavel)?;
    reject_collection_slip(&digits)?;

    let mut bytes = [0u8; LINHA_DIGITAVEL_LEN];
    bytes.copy_from_slice(digits.as_bytes());

    if let Some(err) = block_check_digit_errors(&bytes).into_iter().next() {
        return Err(err);
    }

    let barcode = linha_to_barcode_bytes(&bytes);
    verify_barcode_check_digit(&barcode)?;

    Ok(DigitString::from_ascii_digits(&barcode))
}

/// Convert whichever representation `candidate` is into the linha digitável
pub fn to_linha_digitavel(candidate: &str) -> Result<DigitString> {
    let digits = DigitString::parse(candidate)?;
    match digits.layout() {
        Some(Layout::Barcode) => barcode_to_linha_digitavel(&digits),
        Some(Layout::LinhaDigitavel) => {
            // round trip through the barcode to verify every digit
            linha_digitavel_to_barcode(&digits)?;
            Ok(digits)
        }
        None => Err(BoletoError::InvalidLength {
            expected: "44 or 47",
            actual: digits.len(),
        }),
    }
}

// ============================================================================
// SHARED HELPERS (also used by the validator)
// ============================================================================

/// Leading 8 marks a collection slip ("arrecadação"), whose line has 48 digits
pub(crate) fn reject_collection_slip(digits: &str) -> Result<()> {
    if digits.starts_with('8') {
        return Err(BoletoError::UnsupportedSegment(
            "collection slips (leading 8) are not bank boletos".to_string(),
        ));
    }
    Ok(())
}

pub(crate) fn to_barcode_array(digits: &str) -> [u8; BARCODE_LEN] {
    let mut bytes = [0u8; BARCODE_LEN];
    bytes.copy_from_slice(digits.as_bytes());
    bytes
}

/// Expected general check digit: Modulo-11 over the 43 other barcode digits
pub(crate) fn barcode_check_digit(barcode: &[u8; BARCODE_LEN]) -> u8 {
    let without_dv = barcode[..BARCODE_CHECK_DIGIT]
        .iter()
        .chain(&barcode[BARCODE_CHECK_DIGIT + 1..])
        .map(|b| b - b'0');
    modulo11_digits(without_dv, Modulo11Rule::Febraban)
}

pub(crate) fn verify_barcode_check_digit(barcode: &[u8; BARCODE_LEN]) -> Result<()> {
    let expected = barcode_check_digit(barcode);
    let found = barcode[BARCODE_CHECK_DIGIT] - b'0';
    if expected != found {
        return Err(BoletoError::ChecksumMismatch {
            field: Field::CheckDigit,
            expected,
            found,
        });
    }
    Ok(())
}

/// One `ChecksumMismatch` per block whose Modulo-10 digit is wrong
pub(crate) fn block_check_digit_errors(linha: &[u8; LINHA_DIGITAVEL_LEN]) -> Vec<BoletoError> {
    LINHA_BLOCKS
        .iter()
        .filter_map(|block| {
            let data = &linha[block.offset..block.offset + block.width];
            let expected = modulo10_digits(data.iter().map(|b| b - b'0'));
            let found = linha[block.check_digit_offset()] - b'0';
            (expected != found).then_some(BoletoError::ChecksumMismatch {
                field: block.check_digit,
                expected,
                found,
            })
        })
        .collect()
}

pub(crate) fn barcode_to_linha_bytes(barcode: &[u8; BARCODE_LEN]) -> [u8; LINHA_DIGITAVEL_LEN] {
    let mut linha = [b'0'; LINHA_DIGITAVEL_LEN];
    for mv in SEGMENT_MAP {
        linha[mv.linha_offset..mv.linha_offset + mv.width]
            .copy_from_slice(&barcode[mv.barcode_offset..mv.barcode_offset + mv.width]);
    }

    for block in LINHA_BLOCKS {
        let data = &linha[block.offset..block.offset + block.width];
        let dv = modulo10_digits(data.iter().map(|b| b - b'0'));
        linha[block.check_digit_offset()] = b'0' + dv;
    }

    linha
}

pub(crate) fn linha_to_barcode_bytes(linha: &[u8; LINHA_DIGITAVEL_LEN]) -> [u8; BARCODE_LEN] {
    let mut barcode = [b'0'; BARCODE_LEN];
    for mv in SEGMENT_MAP {
        barcode[mv.barcode_offset..mv.barcode_offset + mv.width]
            .copy_from_slice(&linha[mv.linha_offset..mv.linha_offset + mv.width]);
    }
    barcode
}

// ============================================================================
// TESTS
// ============================================================================
