//! Money value object.
//!
//! Amounts are kept in minor units (cents) so they are non-negative by
//! construction and price arithmetic is exact.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// A non-negative amount in the store currency, in cents.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    /// Build an amount from whole units and cents (`29, 99` is `$29.99`).
    pub fn from_major_minor(major: u64, minor: u8) -> DomainResult<Self> {
        if minor >= 100 {
            return Err(DomainError::validation(format!(
                "minor units must be below 100 (got {minor})"
            )));
        }
        major
            .checked_mul(100)
            .and_then(|c| c.checked_add(u64::from(minor)))
            .map(Self)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))
    }

    /// Parse a decimal amount such as `"29.99"`, `"30"` or `"0.5"`.
    ///
    /// At most two fractional digits are accepted; negative amounts are rejected.
    pub fn parse(input: &str) -> DomainResult<Self> {
        let s = input.trim().trim_start_matches('$');
        let (major, minor) = match s.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (s, ""),
        };

        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if major.is_empty() || !is_digits(major) || !is_digits(minor) || minor.len() > 2 {
            return Err(DomainError::validation(format!("invalid amount: {input:?}")));
        }

        let major: u64 = major
            .parse()
            .map_err(|_| DomainError::validation(format!("invalid amount: {input:?}")))?;
        let minor: u8 = match minor.len() {
            0 => 0,
            1 => minor.parse::<u8>().unwrap_or(0) * 10,
            _ => minor.parse::<u8>().unwrap_or(0),
        };

        Self::from_major_minor(major, minor)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// `self * quantity`, failing instead of wrapping on overflow.
    pub fn times(self, quantity: u64) -> DomainResult<Self> {
        self.0
            .checked_mul(quantity)
            .map(Self)
            .ok_or_else(|| DomainError::invariant("money amount overflow"))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
