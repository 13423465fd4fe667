use crate::error::BookingError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// Represents a monetary value in the property's currency.
///
/// This is a wrapper around `rust_decimal::Decimal` so that prices and fees
/// add up exactly, with rounding applied only where the pricing rules ask for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

// Serialized normalized so `405.00` and `405` look the same in reports.
impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Highest nightly rate a listing may charge.
pub const MAX_NIGHTLY_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// A positive nightly rate of at most [`MAX_NIGHTLY_RATE`].
///
/// Catalog entries and CLI input are checked once here so the pricing
/// calculator can multiply by any night count without overflowing.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct NightlyRate(Decimal);

impl NightlyRate {
    pub fn new(value: Decimal) -> Result<Self, BookingError> {
        if value <= Decimal::ZERO {
            Err(BookingError::validation(
                "price_per_night",
                "nightly rate must be positive",
            ))
        } else if value > MAX_NIGHTLY_RATE {
            Err(BookingError::validation(
                "price_per_night",
                format!("nightly rate must not exceed {MAX_NIGHTLY_RATE}"),
            ))
        } else {
            Ok(Self(value))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for NightlyRate {
    type Error = BookingError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NightlyRate> for Decimal {
    fn from(rate: NightlyRate) -> Self {
        rate.0
    }
}

impl From<NightlyRate> for Money {
    fn from(rate: NightlyRate) -> Self {
        Self(rate.0)
    }
}

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Rounds to whole currency units, halves away from zero.
    pub fn round_whole(self) -> Self {
        Self(self.0.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Applies a rate (e.g. `0.12`) and rounds the result to whole units.
    pub fn percentage(self, rate: Decimal) -> Self {
        Self(self.0 * rate).round_whole()
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<u32> for Money {
    type Output = Self;
    fn mul(self, rhs: u32) -> Self::Output {
        Self(self.0 * Decimal::from(rhs))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
