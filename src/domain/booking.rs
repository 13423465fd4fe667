use super::draft::{BookingDraft, PaymentMethod};
use super::money::Money;
use super::pricing::PriceBreakdown;
use serde::{Deserialize, Serialize};

/// What the payment gateway is asked to charge.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct PaymentRequest {
    pub property_id: String,
    pub amount: Money,
    pub method: PaymentMethod,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct PaymentReceipt {
    pub reference: String,
}

/// Handed to the host once the wizard reaches `Success`.
///
/// Nothing is persisted: the confirmation is the only record of the booking
/// and it is up to the host to keep it.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct BookingConfirmation {
    pub property_id: String,
    pub property_name: String,
    pub draft: BookingDraft,
    pub pricing: PriceBreakdown,
    pub reference: String,
}
