//! Derived pricing for a stay.
//!
//! Nothing here is stored: a `PriceBreakdown` is recomputed from the draft
//! dates and the property's nightly rate whenever it is needed.

use super::money::{Money, NightlyRate};
use crate::error::{BookingError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Highest cleaning fee a policy may charge.
pub const MAX_CLEANING_FEE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Fee schedule applied on top of the nightly subtotal.
///
/// Fees are never negative and rates never exceed 100%, so a positive
/// nightly rate always yields a positive total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    cleaning_fee: Money,
    service_rate: Decimal,
    tax_rate: Decimal,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            cleaning_fee: Money::new(dec!(45)),
            service_rate: dec!(0.12),
            tax_rate: dec!(0.08),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBreakdown {
    pub nights: u32,
    pub subtotal: Money,
    pub cleaning_fee: Money,
    pub service_fee: Money,
    pub taxes: Money,
    pub total: Money,
}

impl PricingPolicy {
    pub fn new(cleaning_fee: Decimal, service_rate: Decimal, tax_rate: Decimal) -> Result<Self> {
        if cleaning_fee < Decimal::ZERO || cleaning_fee > MAX_CLEANING_FEE {
            return Err(BookingError::validation(
                "cleaning_fee",
                format!("cleaning fee must be between 0 and {MAX_CLEANING_FEE}"),
            ));
        }
        check_rate("service_rate", service_rate)?;
        check_rate("tax_rate", tax_rate)?;
        Ok(Self {
            cleaning_fee: Money::new(cleaning_fee),
            service_rate,
            tax_rate,
        })
    }

    pub fn cleaning_fee(&self) -> Money {
        self.cleaning_fee
    }

    pub fn service_rate(&self) -> Decimal {
        self.service_rate
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Prices a stay. Never fails: missing, unparsable or inverted dates
    /// are charged as a single night.
    pub fn quote(&self, rate: NightlyRate, check_in: &str, check_out: &str) -> PriceBreakdown {
        let nights = nights_between(check_in, check_out);
        let subtotal = Money::from(rate) * nights;
        let service_fee = subtotal.percentage(self.service_rate);
        let taxes = subtotal.percentage(self.tax_rate);

        PriceBreakdown {
            nights,
            subtotal,
            cleaning_fee: self.cleaning_fee,
            service_fee,
            taxes,
            total: subtotal + self.cleaning_fee + service_fee + taxes,
        }
    }
}

/// Prices a stay with the default fee schedule.
pub fn quote(rate: NightlyRate, check_in: &str, check_out: &str) -> PriceBreakdown {
    PricingPolicy::default().quote(rate, check_in, check_out)
}

/// Number of nights between two `YYYY-MM-DD` dates, at least 1.
pub fn nights_between(check_in: &str, check_out: &str) -> u32 {
    match (parse_date(check_in), parse_date(check_out)) {
        (Some(start), Some(end)) => {
            let days = (end - start).num_days();
            u32::try_from(days).unwrap_or(0).max(1)
        }
        _ => 1,
    }
}

/// Strict counterpart of [`nights_between`]: reports which field is wrong
/// instead of falling back to one night.
pub fn validate_stay(check_in: &str, check_out: &str) -> Result<u32> {
    let start = require_date("check_in", check_in)?;
    let end = require_date("check_out", check_out)?;

    let days = (end - start).num_days();
    if days < 1 {
        return Err(BookingError::validation(
            "check_out",
            "check-out must be after check-in",
        ));
    }
    u32::try_from(days).map_err(|_| BookingError::validation("check_out", "stay is too long"))
}

fn check_rate(field: &'static str, rate: Decimal) -> Result<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(BookingError::validation(field, "rate must be between 0 and 1"));
    }
    Ok(())
}

fn require_date(field: &'static str, value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return Err(BookingError::validation(field, "date is required"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| BookingError::validation(field, format!("invalid date '{value}': {e}")))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
