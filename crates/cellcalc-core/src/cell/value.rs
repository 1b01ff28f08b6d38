//! Calculated cell values

use crate::error::{Error, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use std::fmt;
use std::str::FromStr;

/// An exact decimal number produced by evaluating a cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalculatedResult(Decimal);

impl CalculatedResult {
    /// Result of an empty or text cell
    pub const ZERO: CalculatedResult = CalculatedResult(Decimal::ZERO);

    /// Check if this is zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Result<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or_else(|| Error::arithmetic(format!("Overflow in {} + {}", self, other)))
    }

    pub fn checked_sub(self, other: Self) -> Result<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or_else(|| Error::arithmetic(format!("Overflow in {} - {}", self, other)))
    }

    pub fn checked_mul(self, other: Self) -> Result<Self> {
        self.0
            .checked_mul(other.0)
            .map(Self)
            .ok_or_else(|| Error::arithmetic(format!("Overflow in {} * {}", self, other)))
    }

    pub fn checked_div(self, other: Self) -> Result<Self> {
        if other.is_zero() {
            return Err(Error::arithmetic("Division by zero"));
        }
        self.0
            .checked_div(other.0)
            .map(Self)
            .ok_or_else(|| Error::arithmetic(format!("Overflow in {} / {}", self, other)))
    }

    /// Arithmetic negation
    pub fn negate(self) -> Self {
        Self(-self.0)
    }

    /// Convert to an exact integer, failing for fractions or values outside `i64`
    pub fn to_exact_integer(self) -> Result<i64> {
        if !self.0.fract().is_zero() {
            return Err(Error::InvalidExponent(format!("{} is not an integer", self)));
        }
        self.0
            .to_i64()
            .ok_or_else(|| Error::InvalidExponent(format!("{} is out of range", self)))
    }

    /// Raise to an integral power given as a result (e.g. the second `pow` argument)
    pub fn pow(self, exponent: Self) -> Result<Self> {
        self.powi(exponent.to_exact_integer()?)
    }

    /// Raise to an integer power; a negative exponent yields the reciprocal
    pub fn powi(self, exponent: i64) -> Result<Self> {
        if exponent < 0 && self.is_zero() {
            return Err(Error::arithmetic("Division by zero"));
        }
        self.0
            .checked_powi(exponent)
            .map(Self)
            .ok_or_else(|| Error::arithmetic(format!("Overflow in {}^{}", self, exponent)))
    }
}

impl From<i64> for CalculatedResult {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Decimal> for CalculatedResult {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl TryFrom<f64> for CalculatedResult {
    type Error = Error;

    /// Uses the shortest decimal text that round-trips the float, so `0.1`
    /// becomes exactly `0.1` rather than its binary approximation.
    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidNumber(value.to_string()));
        }
        let text = value.to_string();
        Decimal::from_str(&text)
            .map(Self)
            .map_err(|e| Error::InvalidNumber(format!("{}: {}", text, e)))
    }
}

impl fmt::Display for CalculatedResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}
