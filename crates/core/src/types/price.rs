//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are held as [`Decimal`] so that totals such as `3 × 19.99` come out
//! exact. Formatting follows the en-US convention: currency symbol, thousands
//! separators, two fraction digits (`$1,234.50`, `-€5.00`).

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Multiply the amount by a quantity, keeping the currency.
    ///
    /// Saturates at `Decimal::MAX` / `Decimal::MIN` instead of overflowing.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(line_amount(self.amount, quantity), self.currency_code)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format_currency(self.amount, self.currency_code)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::CAD => "CA$",
            Self::AUD => "A$",
        }
    }

    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

/// Error parsing a currency code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported currency code: {0}")]
pub struct CurrencyCodeError(pub String);

impl FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(CurrencyCodeError(s.to_string())),
        }
    }
}

/// `unit × quantity`, saturating at the `Decimal` bounds.
#[must_use]
pub fn line_amount(unit: Decimal, quantity: u32) -> Decimal {
    unit.checked_mul(Decimal::from(quantity))
        .unwrap_or_else(|| saturated(unit.is_sign_negative()))
}

/// Sum of amounts, saturating at the `Decimal` bounds.
#[must_use]
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .unwrap_or_else(|| saturated(amount.is_sign_negative()))
    })
}

const fn saturated(negative: bool) -> Decimal {
    if negative { Decimal::MIN } else { Decimal::MAX }
}

/// Format a decimal amount as currency.
///
/// Rounds half away from zero to two places. Negative zero renders as
/// positive zero.
#[must_use]
pub fn format_currency(amount: Decimal, currency: CurrencyCode) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{}{}.{fraction}",
        currency.symbol(),
        group_thousands(whole)
    )
}

/// Insert `,` between groups of three digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
