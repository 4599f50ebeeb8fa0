// ⚙️ Extractor Configuration
//
// Defaults match the behaviour of the extraction pipeline with no overrides.
// Overrides come from JSON or from BOLETO_* environment variables.

use crate::format::DisplayStyle;
use serde::{Deserialize, Serialize};

pub const ENV_DISPLAY: &str = "BOLETO_DISPLAY";
pub const ENV_CONVERT_BARCODES: &str = "BOLETO_CONVERT_BARCODES";
pub const ENV_SCAN_TEXT_ALWAYS: &str = "BOLETO_SCAN_TEXT_ALWAYS";
pub const ENV_EXTRA_BANKS: &str = "BOLETO_EXTRA_BANKS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Report 44-digit barcodes as their 47-digit linha digitável
    pub convert_barcodes: bool,
    /// Scan the text even when barcode payloads already produced results
    pub scan_text_always: bool,
    pub display_style: DisplayStyle,
    /// Bank codes accepted in addition to the built-in table
    pub extra_bank_codes: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            convert_barcodes: true,
            scan_text_always: false,
            display_style: DisplayStyle::Grouped,
            extra_bank_codes: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Defaults overridden by BOLETO_* environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Unparseable values fall back to the default
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let display_style = match lookup(ENV_DISPLAY) {
            Some(value) => value.parse().unwrap_or_else(|err| {
                tracing::warn!("{}: {}, using {}", ENV_DISPLAY, err, defaults.display_style.name());
                defaults.display_style
            }),
            None => defaults.display_style,
        };

        let extra_bank_codes = lookup(ENV_EXTRA_BANKS)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|code| !code.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or(defaults.extra_bank_codes);

        ExtractorConfig {
            convert_barcodes: parse_bool(lookup(ENV_CONVERT_BARCODES), defaults.convert_barcodes),
            scan_text_always: parse_bool(lookup(ENV_SCAN_TEXT_ALWAYS), defaults.scan_text_always),
            display_style,
            extra_bank_codes,
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    value
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}
