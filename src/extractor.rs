// 📥 Boleto Extractor - candidates in, validated linhas digitáveis out
//
// Pipeline:
//   1. scan decoded barcode payloads (primary source)
//   2. scan the text when payloads gave nothing valid (or always, if configured)
//   3. validate every candidate, keep the reports of rejected ones
//   4. convert 44-digit barcodes to linhas, dedupe, format

use crate::config::ExtractorConfig;
use crate::converter::barcode_to_linha_digitavel;
use crate::digits::DigitString;
use crate::entities::bank::BankRegistry;
use crate::format::format_boleto_number;
use crate::layout::Layout;
use crate::scanner::{find_candidates, find_candidates_in_payloads};
use crate::validator::{ValidationReport, Validator};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionOutcome {
    pub boleto_numbers: Vec<String>,
    pub formatted_numbers: Vec<String>,
    pub count: usize,
    pub rejected: Vec<ValidationReport>,
}

impl ExtractionOutcome {
    pub fn is_empty(&self) -> bool {
        self.boleto_numbers.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct BoletoExtractor {
    config: ExtractorConfig,
    validator: Validator,
}

impl BoletoExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        let banks = BankRegistry::with_extra_codes(&config.extra_bank_codes);
        BoletoExtractor {
            validator: Validator::with_registry(banks),
            config,
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Extract boleto numbers from decoded barcode payloads, falling back to text
    pub fn extract<S: AsRef<str>>(&self, text: &str, payloads: &[S]) -> ExtractionOutcome {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        let from_payloads = find_candidates_in_payloads(payloads.iter().map(|p| p.as_ref()));
        tracing::debug!(
            "{} candidate(s) in {} barcode payload(s)",
            from_payloads.len(),
            payloads.len()
        );
        self.screen(from_payloads, &mut accepted, &mut rejected);

        if accepted.is_empty() || self.config.scan_text_always {
            let from_text: Vec<DigitString> = find_candidates(text).collect();
            tracing::debug!("{} candidate(s) in text", from_text.len());
            self.screen(from_text, &mut accepted, &mut rejected);
        }

        self.finish(accepted, rejected)
    }

    pub fn extract_from_text(&self, text: &str) -> ExtractionOutcome {
        self.extract::<&str>(text, &[])
    }

    pub fn extract_from_payloads<S: AsRef<str>>(&self, payloads: &[S]) -> ExtractionOutcome {
        self.extract("", payloads)
    }

    /// Validate candidates, moving each into `accepted` or `rejected`
    fn screen(
        &self,
        candidates: Vec<DigitString>,
        accepted: &mut Vec<DigitString>,
        rejected: &mut Vec<ValidationReport>,
    ) {
        for candidate in candidates {
            let report = self.validator.validate(&candidate);
            if report.is_valid() {
                accepted.push(candidate);
            } else {
                tracing::debug!("Rejected candidate: {}", report.summary());
                rejected.push(report);
            }
        }
    }

    fn finish(
        &self,
        accepted: Vec<DigitString>,
        rejected: Vec<ValidationReport>,
    ) -> ExtractionOutcome {
        let mut seen = HashSet::new();
        let mut boleto_numbers = Vec::new();

        for candidate in accepted {
            let number = match (candidate.layout(), self.config.convert_barcodes) {
                (Some(Layout::Barcode), true) => match barcode_to_linha_digitavel(&candidate) {
                    Ok(linha) => linha.into_string(),
                    Err(e) => {
                        tracing::debug!("Could not convert barcode {}: {}", candidate, e);
                        continue;
                    }
                },
                _ => candidate.into_string(),
            };

            if seen.insert(number.clone()) {
                boleto_numbers.push(number);
            }
        }

        let formatted_numbers = boleto_numbers
            .iter()
            .map(|n| format_boleto_number(n, self.config.display_style))
            .collect();

        tracing::info!(
            "Extracted {} boleto number(s), rejected {} candidate(s)",
            boleto_numbers.len(),
            rejected.len()
        );

        ExtractionOutcome {
            count: boleto_numbers.len(),
            boleto_numbers,
            formatted_numbers,
            rejected,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
