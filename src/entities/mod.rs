// Entity Models
//
// - Bank: code table and registry used to judge bank prefixes
// - Boleto: decoded view over a validated barcode / linha digitável pair

pub mod bank;
pub mod boleto;

pub use bank::{Bank, BankCode, BankRegistry, KNOWN_BANKS};
pub use boleto::{due_date_from_factor, format_amount, Boleto, BoletoDetails};
