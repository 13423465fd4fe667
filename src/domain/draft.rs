use crate::error::BookingError;
use serde::{Deserialize, Serialize};

pub const MIN_GUESTS: u8 = 1;
pub const MAX_GUESTS: u8 = 10;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
}

/// Guest count, always within `MIN_GUESTS..=MAX_GUESTS`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(try_from = "u8", into = "u8")]
pub struct GuestCount(u8);

impl TryFrom<u8> for GuestCount {
    type Error = BookingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| {
            BookingError::validation(
                "guests",
                format!("guest count must be between {MIN_GUESTS} and {MAX_GUESTS}"),
            )
        })
    }
}

impl From<GuestCount> for u8 {
    fn from(guests: GuestCount) -> Self {
        guests.0
    }
}

impl Default for GuestCount {
    fn default() -> Self {
        Self(MIN_GUESTS)
    }
}

impl GuestCount {
    pub fn new(count: u8) -> Option<Self> {
        (MIN_GUESTS..=MAX_GUESTS)
            .contains(&count)
            .then_some(Self(count))
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    /// Adds one guest. No effect at the upper bound.
    pub fn increment(&mut self) {
        if self.0 < MAX_GUESTS {
            self.0 += 1;
        }
    }

    /// Removes one guest. No effect at the lower bound.
    pub fn decrement(&mut self) {
        if self.0 > MIN_GUESTS {
            self.0 -= 1;
        }
    }
}

/// The user's unsaved selections for one wizard session.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
pub struct BookingDraft {
    pub guests: GuestCount,
    pub check_in: String,
    pub check_out: String,
    pub payment_method: PaymentMethod,
}

impl BookingDraft {
    pub fn has_dates(&self) -> bool {
        !self.check_in.trim().is_empty() && !self.check_out.trim().is_empty()
    }
}
