//! Display formatting for money amounts.
//!
//! Output follows en-US conventions: currency symbol prefix, comma thousands
//! separators, exactly two decimals, leading minus for negatives
//! (`-$1,234.50`). Amounts are converted to `Decimal` and rounded to cents
//! half away from zero, so decimal midpoints like `1.005` round up even when
//! their binary value sits just below.

use core::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use fieldservice_core::DomainError;

/// Supported display currencies. One is fixed per deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Cad,
    Eur,
    Gbp,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Cad => "CAD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Symbol as rendered in an en-US locale.
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Cad => "CA$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "CAD" => Ok(Currency::Cad),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            other => Err(DomainError::validation(format!(
                "unsupported currency code: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoneyFormatter {
    currency: Currency,
}

impl MoneyFormatter {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Non-finite amounts render as zero.
    pub fn format(&self, amount: f64) -> String {
        let rounded = to_decimal(amount)
            .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let rounded = rounded.abs();
        let whole = rounded.trunc().to_u128().unwrap_or(0);
        let cents = (rounded.fract() * Decimal::ONE_HUNDRED).to_u32().unwrap_or(0);

        format!(
            "{sign}{}{}.{cents:02}",
            self.currency.symbol(),
            group_thousands(whole)
        )
    }
}

const DECIMAL_PLACES: u32 = 2;

/// Finite amounts beyond `Decimal`'s range saturate at its bounds.
fn to_decimal(amount: f64) -> Decimal {
    if !amount.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(amount).unwrap_or(if amount < 0.0 {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Format `amount` in USD.
pub fn format_money(amount: f64) -> String {
    MoneyFormatter::default().format(amount)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
