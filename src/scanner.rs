// 🔎 Candidate Scanner - boleto-shaped digit runs in free text
//
// A "run" is a sequence of digit groups separated only by separators
// (whitespace, dots, dashes), e.g. "23793.38128 60000.000003 ...".
// Inside a run, consecutive groups whose digits add up to exactly 47 or 44
// form a candidate. Groups glued to letters ("ID123", "R2D2") belong to
// identifiers and are ignored.
//
// The scanner only finds shapes; the validator decides what is a boleto.

use crate::digits::{is_separator, DigitString};
use crate::layout::{BARCODE_LEN, LINHA_DIGITAVEL_LEN};
use std::collections::{HashSet, VecDeque};

/// Lazily scan `text` for 44/47-digit candidates
///
/// Candidates come out in order of first appearance, each value once.
/// The iterator is `Clone`, and calling this again restarts the scan.
pub fn find_candidates(text: &str) -> Candidates<'_> {
    Candidates {
        text,
        pos: 0,
        pending: VecDeque::new(),
        seen: HashSet::new(),
    }
}

/// Scan an ordered list of decoded barcode payloads with one shared
/// deduplication set
pub fn find_candidates_in_payloads<'a, I>(payloads: I) -> Vec<DigitString>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    payloads
        .into_iter()
        .flat_map(find_candidates)
        .filter(|candidate| seen.insert(candidate.clone()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    text: &'a str,
    pos: usize,
    pending: VecDeque<DigitString>,
    seen: HashSet<DigitString>,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = DigitString;

    fn next(&mut self) -> Option<DigitString> {
        loop {
            while let Some(candidate) = self.pending.pop_front() {
                if self.seen.insert(candidate.clone()) {
                    return Some(candidate);
                }
            }

            let run = self.next_run()?;
            self.pending.extend(windows(&run));
        }
    }
}

impl<'a> Candidates<'a> {
    /// Next run of separator-joined digit groups, or `None` at end of text
    fn next_run(&mut self) -> Option<Vec<&'a str>> {
        let text = self.text;
        let mut groups: Vec<&'a str> = Vec::new();
        let mut group_start: Option<usize> = None;
        // current group starts right after a letter
        let mut glued_left = false;
        let mut after_letter = false;

        for (offset, ch) in text[self.pos..].char_indices() {
            let idx = self.pos + offset;

            if ch.is_ascii_digit() {
                if group_start.is_none() {
                    group_start = Some(idx);
                    glued_left = after_letter;
                }
                after_letter = false;
                continue;
            }

            let letter = ch.is_alphanumeric();
            if let Some(start) = group_start.take() {
                if glued_left || letter {
                    // identifier digits end the run without joining it
                    if !groups.is_empty() {
                        self.pos = idx;
                        return Some(groups);
                    }
                } else {
                    groups.push(&text[start..idx]);
                }
            }

            if is_separator(ch) {
                after_letter = false;
                continue;
            }

            after_letter = letter;
            if !groups.is_empty() {
                self.pos = idx;
                return Some(groups);
            }
        }

        if let Some(start) = group_start {
            if !glued_left {
                groups.push(&text[start..]);
            }
        }

        self.pos = text.len();
        if groups.is_empty() {
            None
        } else {
            Some(groups)
        }
    }
}

/// Windows of consecutive groups totalling 47 or 44 digits, tried from every
/// starting group
///
/// Windows may overlap: a document number right before a typed line can form
/// a bogus window that must not hide the real one. From the same start the
/// 47-digit window comes first.
fn windows(groups: &[&str]) -> Vec<DigitString> {
    let mut found = Vec::new();

    for start in 0..groups.len() {
        let mut total = 0;
        let mut barcode_end = None;
        let mut linha_end = None;

        for (end, group) in groups.iter().enumerate().skip(start) {
            total += group.len();
            if total == BARCODE_LEN {
                barcode_end = Some(end);
            }
            if total >= LINHA_DIGITAVEL_LEN {
                if total == LINHA_DIGITAVEL_LEN {
                    linha_end = Some(end);
                }
                break;
            }
        }

        for end in linha_end.into_iter().chain(barcode_end) {
            let digits = groups[start..=end].concat();
            found.push(DigitString::from_ascii_digits(digits.as_bytes()));
        }
    }

    found
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BARCODE: &str = "19797116900000386000000004572849356277103564";
    const LINHA: &str = "19790000050457284935662771035649711690000038600";

    fn collect(text: &str) -> Vec<String> {
        find_candidates(text).map(String::from).collect()
    }

    #[test]
    fn test_labelled_barcode() {
        let found = collect("Boleto: 00193373700000001000500940144816060680935031");
        assert_eq!(found, vec!["00193373700000001000500940144816060680935031"]);
    }

    #[test]
    fn test_typed_line_with_separators() {
        let text = "Linha digitável:\n\
                    19790.00005 04572.849356 62771.035649 7 11690000038600\n\
                    Vencimento 19/12/2000";
        assert_eq!(collect(text), vec![LINHA]);
    }

    #[test]
    fn test_dashes_and_multiple_candidates_in_order() {
        let text = format!(
            "Outro boleto: 0019-3373-7000 0000 1000 5009 4014 4816 0606 8093 5031 e {} fim",
            BARCODE
        );
        assert_eq!(
            collect(&text),
            vec!["00193373700000001000500940144816060680935031", BARCODE]
        );
    }

    #[test]
    fn test_deduplicates_by_value() {
        let text = format!("{} repeated {} and {}", BARCODE, BARCODE, LINHA);
        assert_eq!(collect(&text), vec![BARCODE, LINHA]);
    }

    #[test]
    fn test_ignores_other_lengths() {
        assert!(collect("").is_empty());
        assert!(collect("This text contains no boleto numbers at all.").is_empty());
        assert!(collect("Invalid: 123456789").is_empty());
        // 48 contiguous digits are not a 47 + 1
        assert!(collect(&format!("{}1", LINHA)).is_empty());
    }

    #[test]
    fn test_ignores_digits_glued_to_letters() {
        assert!(collect(&format!("ID{}", BARCODE)).is_empty());
        assert!(collect(&format!("{}x", BARCODE)).is_empty());
        // a glued prefix does not swallow the real number
        assert_eq!(collect(&format!("NF12 {}", BARCODE)), vec![BARCODE]);
    }

    #[test]
    fn test_leading_noise_group_skipped() {
        let text = format!(
            "Nosso número 12 {}",
            "19790.00005 04572.849356 62771.035649 7 11690000038600"
        );
        assert_eq!(collect(&text), vec![LINHA]);
    }

    #[test]
    fn test_document_number_does_not_hide_typed_line() {
        let text = "CPF 123.456.789-01 19790.00005 04572.849356 62771.035649 7 11690000038600";
        let found = collect(text);

        // CPF + first 33 digits of the line also total 44
        assert_eq!(found.len(), 2);
        assert_eq!(found[0], "12345678901197900000504572849356627710356497");
        assert_eq!(found[1], LINHA);
    }

    #[test]
    fn test_both_shapes_from_same_start() {
        let text = format!("{} 123", BARCODE);
        let found = collect(&text);
        assert_eq!(found, vec![format!("{}123", BARCODE), BARCODE.to_string()]);
    }

    #[test]
    fn test_restartable_and_lazy() {
        let text = format!("{} {}", "a", BARCODE);
        let mut scan = find_candidates(&text);
        let snapshot = scan.clone();

        assert_eq!(scan.next().map(String::from), Some(BARCODE.to_string()));
        assert_eq!(scan.next(), None);
        assert_eq!(snapshot.count(), 1);
        assert_eq!(find_candidates(&text).count(), 1);
    }

    #[test]
    fn test_non_ascii_separators_and_text() {
        let text = format!("Código de barras:\u{a0}{}\u{a0}— pagamento", BARCODE);
        assert_eq!(collect(&text), vec![BARCODE]);
    }

    #[test]
    fn test_payloads_share_deduplication() {
        let payloads = [
            BARCODE,
            "garbage",
            BARCODE,
            "0019 3373 7000 0000 1000 5009 4014 4816 0606 8093 5031",
        ];
        let found: Vec<String> = find_candidates_in_payloads(payloads.iter().copied())
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(found, vec![BARCODE, "00193373700000001000500940144816060680935031"]);
    }
}
