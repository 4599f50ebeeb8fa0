// 🖨️ Display Formatting
// Human-readable renderings of barcodes and linhas digitáveis

use crate::layout::LINHA_DIGITAVEL_LEN;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const GROUP_WIDTH: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// Digits only
    Plain,
    /// 4-digit groups separated by spaces
    #[default]
    Grouped,
    /// The line as printed on the boleto: 5.5 5.6 5.6 1 14
    Typed,
}

impl DisplayStyle {
    pub fn name(&self) -> &'static str {
        match self {
            DisplayStyle::Plain => "plain",
            DisplayStyle::Grouped => "grouped",
            DisplayStyle::Typed => "typed",
        }
    }
}

impl FromStr for DisplayStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(DisplayStyle::Plain),
            "grouped" => Ok(DisplayStyle::Grouped),
            "typed" => Ok(DisplayStyle::Typed),
            other => Err(format!("unknown display style: {}", other)),
        }
    }
}

/// Format a boleto number; lengths other than 44/47 come back unchanged
pub fn format_boleto_number(number: &str, style: DisplayStyle) -> String {
    match style {
        DisplayStyle::Plain => number.to_string(),
        DisplayStyle::Grouped => format_grouped(number),
        DisplayStyle::Typed => format_typed(number),
    }
}

/// "1979 0000 0504 ... 600": groups of four, remainder last
pub fn format_grouped(number: &str) -> String {
    if !matches!(number.len(), 44 | 47) || !number.is_ascii() {
        return number.to_string();
    }

    number
        .as_bytes()
        .chunks(GROUP_WIDTH)
        .map(|chunk| chunk.iter().map(|b| *b as char).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// "19790.00005 04572.849356 62771.035649 7 11690000038600"
pub fn format_typed(linha: &str) -> String {
    if linha.len() != LINHA_DIGITAVEL_LEN || !linha.is_ascii() {
        return linha.to_string();
    }

    format!(
        "{}.{} {}.{} {}.{} {} {}",
        &linha[0..5],
        &linha[5..10],
        &linha[10..15],
        &linha[15..21],
        &linha[21..26],
        &linha[26..32],
        &linha[32..33],
        &linha[33..47],
    )
}
