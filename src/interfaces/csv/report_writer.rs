use crate::domain::booking::BookingConfirmation;
use crate::domain::draft::PaymentMethod;
use crate::domain::money::Money;
use crate::domain::pricing::PriceBreakdown;
use crate::domain::property::Property;
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ConfirmationRow<'a> {
    reference: &'a str,
    property: &'a str,
    check_in: &'a str,
    check_out: &'a str,
    guests: u8,
    payment_method: PaymentMethod,
    nights: u32,
    subtotal: Money,
    cleaning_fee: Money,
    service_fee: Money,
    taxes: Money,
    total: Money,
}

#[derive(Serialize)]
struct PropertyRow<'a> {
    id: &'a str,
    name: &'a str,
    location: &'a str,
    price_per_night: Money,
    amenities: String,
}

/// Writes quotes, confirmations and listings as CSV with a header row.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_breakdown(&mut self, breakdown: &PriceBreakdown) -> Result<()> {
        self.writer.serialize(breakdown)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_confirmation(&mut self, confirmation: &BookingConfirmation) -> Result<()> {
        self.writer.serialize(ConfirmationRow {
            reference: &confirmation.reference,
            property: &confirmation.property_id,
            check_in: &confirmation.draft.check_in,
            check_out: &confirmation.draft.check_out,
            guests: confirmation.draft.guests.get(),
            payment_method: confirmation.draft.payment_method,
            nights: confirmation.pricing.nights,
            subtotal: confirmation.pricing.subtotal,
            cleaning_fee: confirmation.pricing.cleaning_fee,
            service_fee: confirmation.pricing.service_fee,
            taxes: confirmation.pricing.taxes,
            total: confirmation.pricing.total,
        })?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn write_properties(&mut self, properties: &[Property]) -> Result<()> {
        for property in properties {
            self.writer.serialize(PropertyRow {
                id: &property.id,
                name: &property.name,
                location: &property.location,
                price_per_night: property.price_per_night.into(),
                amenities: property.amenities.join(";"),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
