//! UK VAT codes and rates.
//!
//! Posting and reporting deliberately disagree on unrecognised codes:
//! at posting time an unknown code charges no VAT, while report grouping
//! treats it as standard-rated. The asymmetry is inherited behaviour and
//! is kept as-is rather than silently reconciled.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// UK VAT code on an invoice line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VatCode {
    /// Standard rate (20%), code `S`.
    Standard,
    /// Exempt from VAT, code `E`.
    Exempt,
    /// Zero-rated, code `Z`.
    ZeroRated,
}

impl VatCode {
    /// The single-letter code as stored on line items.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::Standard => "S",
            Self::Exempt => "E",
            Self::ZeroRated => "Z",
        }
    }

    /// Parses a raw line-item code (trimmed, case-insensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "S" => Some(Self::Standard),
            "E" => Some(Self::Exempt),
            "Z" => Some(Self::ZeroRated),
            _ => None,
        }
    }

    /// The VAT rate for this code.
    #[must_use]
    pub fn rate(self) -> Decimal {
        match self {
            Self::Standard => standard_rate(),
            Self::Exempt | Self::ZeroRated => Decimal::ZERO,
        }
    }
}

impl std::fmt::Display for VatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// The UK standard VAT rate (20%).
#[must_use]
pub fn standard_rate() -> Decimal {
    Decimal::new(20, 2) // 0.20
}

/// VAT to charge when posting a line item.
///
/// Unrecognised or missing codes charge no VAT.
#[must_use]
pub fn posting_vat(raw_code: Option<&str>, net: Decimal) -> Decimal {
    match raw_code.and_then(VatCode::parse) {
        Some(code) => net * code.rate(),
        None => Decimal::ZERO,
    }
}

/// VAT attributed to a line item in the VAT Return.
///
/// Strictly standard-rated lines contribute 20% of net; everything else,
/// including unrecognised codes, contributes nothing.
#[must_use]
pub fn reporting_vat(raw_code: Option<&str>, net: Decimal) -> Decimal {
    if raw_code.is_some_and(|raw| VatCode::parse(raw) == Some(VatCode::Standard)) {
        net * standard_rate()
    } else {
        Decimal::ZERO
    }
}

/// The group a line item is reported under.
///
/// Unrecognised or missing codes are displayed as standard-rated.
#[must_use]
pub fn reporting_group(raw_code: Option<&str>) -> VatCode {
    raw_code
        .and_then(VatCode::parse)
        .unwrap_or(VatCode::Standard)
}
