//! Value types carried by transaction commands.
//!
//! [`Amount`] is the only interesting one: a decimal fixed-point quantity
//! parsed from the string form clients send. No floating point anywhere near
//! asset quantities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// AmountError
// ---------------------------------------------------------------------------

/// Errors produced while parsing a decimal amount string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    /// The input string was empty.
    #[error("amount string is empty")]
    Empty,

    /// The input contained something other than ASCII digits and one `.`.
    #[error("invalid character {ch:?} at position {position} in amount")]
    InvalidCharacter { ch: char, position: usize },

    /// More than one decimal point.
    #[error("amount contains more than one decimal point")]
    MultipleDecimalPoints,

    /// A decimal point with no digits on one side (`".5"`, `"5."`).
    #[error("amount has a decimal point without digits on both sides")]
    MissingDigits,

    /// More fractional digits than a precision byte can describe.
    #[error("amount has {digits} fractional digits (max 255)")]
    PrecisionTooLarge { digits: usize },

    /// The digits do not fit in the 128-bit mantissa.
    #[error("amount {0} overflows a 128-bit value")]
    Overflow(String),
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A non-negative decimal quantity: `value * 10^-precision`.
///
/// Precision is significant. `"1.0"` and `"1"` are different amounts on the
/// wire (precision 1 vs 0) even though they compare equal numerically; the
/// ledger checks the precision against the asset's declared precision.
///
/// # Examples
///
/// ```
/// use ledger_protocol::transaction::types::Amount;
///
/// let amount: Amount = "12.50".parse().unwrap();
/// assert_eq!(amount.value(), 1250);
/// assert_eq!(amount.precision(), 2);
/// assert_eq!(amount.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amount {
    value: u128,
    precision: u8,
}

impl Amount {
    /// Creates an amount from its integer mantissa and precision.
    pub fn new(value: u128, precision: u8) -> Self {
        Self { value, precision }
    }

    /// Parses a decimal string. Same as `str::parse::<Amount>()`.
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        s.parse()
    }

    /// The integer mantissa.
    pub fn value(&self) -> u128 {
        self.value
    }

    /// Number of fractional digits.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Returns `true` if the amount is zero, whatever its precision.
    pub fn is_zero(&self) -> bool {
        self.value == 0
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(AmountError::Empty);
        }

        let mut point = None;
        for (position, ch) in s.char_indices() {
            match ch {
                '0'..='9' => {}
                '.' if point.is_none() => point = Some(position),
                '.' => return Err(AmountError::MultipleDecimalPoints),
                _ => return Err(AmountError::InvalidCharacter { ch, position }),
            }
        }

        let (whole, frac) = match point {
            Some(at) => (&s[..at], &s[at + 1..]),
            None => (s, ""),
        };
        if point.is_some() && (whole.is_empty() || frac.is_empty()) {
            return Err(AmountError::MissingDigits);
        }

        let precision =
            u8::try_from(frac.len()).map_err(|_| AmountError::PrecisionTooLarge {
                digits: frac.len(),
            })?;

        let mut value: u128 = 0;
        for digit in whole.bytes().chain(frac.bytes()) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(u128::from(digit - b'0')))
                .ok_or_else(|| AmountError::Overflow(s.to_string()))?;
        }

        Ok(Self { value, precision })
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.precision == 0 {
            return write!(f, "{}", self.value);
        }
        let digits = format!(
            "{:0>width$}",
            self.value,
            width = self.precision as usize + 1
        );
        let (whole, frac) = digits.split_at(digits.len() - self.precision as usize);
        write!(f, "{}.{}", whole, frac)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
