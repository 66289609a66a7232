//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. The decimal string form ("100.00") is the wire format used by the
//! worksheet and by CSV export.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// A monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parse a decimal currency string: "100", "100.5", "100.50", "-3.25"
    ///
    /// An optional currency symbol prefix ("R$" or "$") is tolerated so that
    /// values typed at the CLI parse the same as values read back from a
    /// worksheet.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let s = s.strip_prefix("R$").or_else(|| s.strip_prefix('$')).unwrap_or(s).trim();

        if s.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        let cents = match s.split_once('.') {
            Some((whole, frac)) => {
                let whole: i64 = whole
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
                let frac_cents: i64 = match frac.len() {
                    0 => 0,
                    1 => {
                        frac.parse::<i64>()
                            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                            * 10
                    }
                    2 => frac
                        .parse()
                        .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?,
                    _ => return Err(MoneyParseError::InvalidFormat(s.to_string())),
                };
                whole * 100 + frac_cents
            }
            None => {
                s.parse::<i64>()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?
                    * 100
            }
        };

        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Fixed two-decimal string without a currency symbol: "100.00", "-3.25"
    ///
    /// This is the canonical form written to the worksheet and to CSV.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// The amount as a float, for handing to spreadsheet cell writers
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Format with a currency symbol, e.g. "R$ 100.00"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{} {}", symbol, Money(-self.0).to_decimal_string())
        } else {
            format!("{} {}", symbol, self.to_decimal_string())
        }
    }

    /// Scale by a quantity and discount percentage, rounding to the
    /// nearest cent: `self * quantity * (1 - discount_pct / 100)`
    pub fn extend(&self, quantity: f64, discount_pct: u8) -> Self {
        let factor = 1.0 - f64::from(discount_pct) / 100.0;
        Self((self.0 as f64 * quantity * factor).round() as i64)
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string())
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
