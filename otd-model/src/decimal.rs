//
// Copyright (c) The Holo Core Contributors
//
// SPDX-License-Identifier: MIT
//

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// YANG `decimal64` value: a signed 64-bit mantissa scaled by a power of ten.
///
/// Two values compare equal when they represent the same number, regardless
/// of their scale (`10` == `10.00`). The textual form keeps the scale it was
/// parsed with.
#[derive(Clone, Copy, Debug)]
pub struct Decimal64 {
    mantissa: i64,
    fraction_digits: u8,
}

// Decimal64 parse errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DecimalError {
    Empty,
    InvalidDigit,
    FractionDigits,
    Overflow,
}

// ===== impl Decimal64 =====

impl Decimal64 {
    pub const MAX_FRACTION_DIGITS: u8 = 18;
    pub const ZERO: Decimal64 = Decimal64 {
        mantissa: 0,
        fraction_digits: 0,
    };

    pub const fn new(mantissa: i64, fraction_digits: u8) -> Option<Decimal64> {
        if fraction_digits > Self::MAX_FRACTION_DIGITS {
            return None;
        }
        Some(Decimal64 {
            mantissa,
            fraction_digits,
        })
    }

    pub const fn from_int(value: i64) -> Decimal64 {
        Decimal64 {
            mantissa: value,
            fraction_digits: 0,
        }
    }

    pub const fn mantissa(&self) -> i64 {
        self.mantissa
    }

    pub const fn fraction_digits(&self) -> u8 {
        self.fraction_digits
    }

    pub const fn is_positive(&self) -> bool {
        self.mantissa > 0
    }

    // Returns the number of fraction digits actually needed to represent the
    // value, ignoring trailing zeros.
    pub fn precision(&self) -> u8 {
        let mut mantissa = self.mantissa;
        let mut digits = self.fraction_digits;
        while digits > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            digits -= 1;
        }
        digits
    }

    pub fn checked_add(self, rhs: Decimal64) -> Option<Decimal64> {
        let fraction_digits = self.fraction_digits.max(rhs.fraction_digits);
        let lhs = self.rescale(fraction_digits)?;
        let rhs = rhs.rescale(fraction_digits)?;
        let mantissa = lhs.checked_add(rhs)?;
        Some(Decimal64 {
            mantissa,
            fraction_digits,
        })
    }

    fn rescale(&self, fraction_digits: u8) -> Option<i64> {
        let exp = fraction_digits.checked_sub(self.fraction_digits)?;
        self.mantissa.checked_mul(10i64.checked_pow(exp.into())?)
    }

    // Value scaled to the maximum number of fraction digits. Cannot overflow
    // an i128.
    fn normalized(&self) -> i128 {
        let exp = Self::MAX_FRACTION_DIGITS - self.fraction_digits;
        i128::from(self.mantissa) * 10i128.pow(exp.into())
    }
}

impl Default for Decimal64 {
    fn default() -> Decimal64 {
        Decimal64::ZERO
    }
}

impl PartialEq for Decimal64 {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Decimal64 {}

impl PartialOrd for Decimal64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl Hash for Decimal64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl From<i64> for Decimal64 {
    fn from(value: i64) -> Decimal64 {
        Decimal64::from_int(value)
    }
}

impl From<u32> for Decimal64 {
    fn from(value: u32) -> Decimal64 {
        Decimal64::from_int(value.into())
    }
}

impl std::fmt::Display for Decimal64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = i128::from(self.mantissa);
        let sign = if value < 0 { "-" } else { "" };
        let value = value.abs();
        if self.fraction_digits == 0 {
            return write!(f, "{sign}{value}");
        }

        let scale = 10i128.pow(self.fraction_digits.into());
        write!(
            f,
            "{sign}{}.{:0width$}",
            value / scale,
            value % scale,
            width = usize::from(self.fraction_digits)
        )
    }
}

impl FromStr for Decimal64 {
    type Err = DecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };
        let (int_part, frac_part) =
            digits.split_once('.').unwrap_or((digits, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(DecimalError::Empty);
        }
        if frac_part.len() > usize::from(Self::MAX_FRACTION_DIGITS) {
            return Err(DecimalError::FractionDigits);
        }

        let mut mantissa: i64 = 0;
        for c in int_part.chars().chain(frac_part.chars()) {
            let digit = c.to_digit(10).ok_or(DecimalError::InvalidDigit)?;
            mantissa = mantissa
                .checked_mul(10)
                .and_then(|mantissa| mantissa.checked_add(digit.into()))
                .ok_or(DecimalError::Overflow)?;
        }
        if negative {
            mantissa = -mantissa;
        }

        Ok(Decimal64 {
            mantissa,
            // Bounded by the length check above.
            fraction_digits: frac_part.len() as u8,
        })
    }
}

impl Serialize for Decimal64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Decimal64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Decimal64Visitor;

        impl Visitor<'_> for Decimal64Visitor {
            type Value = Decimal64;

            fn expecting(
                &self,
                f: &mut std::fmt::Formatter<'_>,
            ) -> std::fmt::Result {
                write!(f, "a decimal number or a string holding one")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal64, E> {
                v.parse()
                    .map_err(|error| E::custom(format!("{error}: {v:?}")))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal64, E> {
                Ok(Decimal64::from_int(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal64, E> {
                i64::try_from(v)
                    .map(Decimal64::from_int)
                    .map_err(|_| E::custom(DecimalError::Overflow))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal64, E> {
                self.visit_str(&v.to_string())
            }
        }

        deserializer.deserialize_any(Decimal64Visitor)
    }
}

// ===== impl DecimalError =====

impl std::fmt::Display for DecimalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecimalError::Empty => write!(f, "empty decimal value"),
            DecimalError::InvalidDigit => write!(f, "invalid decimal digit"),
            DecimalError::FractionDigits => {
                write!(f, "too many fraction digits")
            }
            DecimalError::Overflow => write!(f, "decimal value out of range"),
        }
    }
}

impl std::error::Error for DecimalError {}
