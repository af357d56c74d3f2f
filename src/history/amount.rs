//! Fixed two-decimal gigabyte amounts.
//!
//! Amounts are held as whole hundredths so the stored text always parses back
//! to the same value. Conversion from `f64` rounds half away from zero on the
//! shortest decimal form of the float: `1234.565` becomes `1234.57`, `0.005`
//! becomes `0.01` and `-0.005` becomes `-0.01`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid memory amount '{0}'")]
pub struct AmountParseError(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GbAmount {
    hundredths: i64,
}

impl GbAmount {
    pub const ZERO: GbAmount = GbAmount { hundredths: 0 };

    pub fn from_hundredths(hundredths: i64) -> Self {
        Self { hundredths }
    }

    /// Round a float to two decimals. Non-finite input has no meaningful
    /// amount and maps to zero.
    pub fn from_gb(value: f64) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        // Display for f64 never uses exponent notation, so this is a plain
        // decimal string.
        round_decimal_str(&value.to_string()).unwrap_or(Self::ZERO)
    }

    pub fn hundredths(&self) -> i64 {
        self.hundredths
    }

    pub fn abs(&self) -> Self {
        Self::from_hundredths(self.hundredths.abs())
    }
}

/// Round a decimal string to hundredths, half away from zero.
fn round_decimal_str(s: &str) -> Option<GbAmount> {
    let s = s.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit()) || !frac_part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().ok()?
    };

    let frac = frac_part.as_bytes();
    let digit = |i: usize| frac.get(i).map_or(0, |b| i64::from(b - b'0'));
    let mut hundredths = whole.checked_mul(100)?.checked_add(digit(0) * 10 + digit(1))?;
    if digit(2) >= 5 {
        hundredths = hundredths.checked_add(1)?;
    }

    Some(GbAmount::from_hundredths(if negative { -hundredths } else { hundredths }))
}

impl fmt::Display for GbAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.hundredths < 0 { "-" } else { "" };
        let abs = self.hundredths.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl FromStr for GbAmount {
    type Err = AmountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        round_decimal_str(s).ok_or_else(|| AmountParseError(s.to_string()))
    }
}

impl Serialize for GbAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GbAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
