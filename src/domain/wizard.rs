use super::booking::{BookingConfirmation, PaymentReceipt, PaymentRequest};
use super::draft::{BookingDraft, PaymentMethod};
use super::pricing::{PriceBreakdown, PricingPolicy, validate_stay};
use super::property::Property;
use crate::error::{BookingError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum WizardStep {
    #[default]
    Dates,
    Review,
    Payment,
    Success,
}

/// A payment the wizard has started and is waiting on.
///
/// The ticket identifies the attempt: only a completion carrying the current
/// ticket may move the wizard out of the processing sub-state.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentAttempt {
    pub ticket: u64,
    pub request: PaymentRequest,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Completed(BookingConfirmation),
    Failed(String),
    /// The attempt was superseded (wizard closed or reset) and was ignored.
    Stale,
}

/// Linear booking flow: `Dates -> Review -> Payment -> Success`.
///
/// Owns the draft exclusively. Pricing is derived on demand from the draft
/// and the property's nightly rate.
#[derive(Debug, Clone)]
pub struct BookingWizard {
    property: Property,
    policy: PricingPolicy,
    strict_dates: bool,
    step: WizardStep,
    draft: BookingDraft,
    processing: Option<u64>,
    next_ticket: u64,
}

impl BookingWizard {
    pub fn new(property: Property) -> Self {
        Self {
            property,
            policy: PricingPolicy::default(),
            strict_dates: false,
            step: WizardStep::Dates,
            draft: BookingDraft::default(),
            processing: None,
            next_ticket: 1,
        }
    }

    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Requires well-formed dates with check-out after check-in before
    /// leaving `Dates`, instead of only non-empty ones.
    pub fn with_strict_dates(mut self, strict: bool) -> Self {
        self.strict_dates = strict;
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn property(&self) -> &Property {
        &self.property
    }

    pub fn is_processing(&self) -> bool {
        self.processing.is_some()
    }

    pub fn pricing(&self) -> PriceBreakdown {
        self.policy.quote(
            self.property.price_per_night,
            &self.draft.check_in,
            &self.draft.check_out,
        )
    }

    pub fn set_check_in(&mut self, date: &str) -> Result<()> {
        self.require_step(WizardStep::Dates, "check_in")?;
        self.draft.check_in = date.trim().to_string();
        Ok(())
    }

    pub fn set_check_out(&mut self, date: &str) -> Result<()> {
        self.require_step(WizardStep::Dates, "check_out")?;
        self.draft.check_out = date.trim().to_string();
        Ok(())
    }

    pub fn increment_guests(&mut self) -> Result<u8> {
        self.require_step(WizardStep::Dates, "guests")?;
        self.draft.guests.increment();
        Ok(self.draft.guests.get())
    }

    pub fn decrement_guests(&mut self) -> Result<u8> {
        self.require_step(WizardStep::Dates, "guests")?;
        self.draft.guests.decrement();
        Ok(self.draft.guests.get())
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<()> {
        self.require_step(WizardStep::Payment, "payment_method")?;
        if self.is_processing() {
            return Err(BookingError::validation(
                "payment_method",
                "payment is already processing",
            ));
        }
        self.draft.payment_method = method;
        Ok(())
    }

    /// Moves one step forward.
    ///
    /// On error the step is unchanged. `Payment` can only be left by
    /// completing a payment attempt.
    pub fn forward(&mut self) -> Result<WizardStep> {
        let next = match self.step {
            WizardStep::Dates => {
                if !self.draft.has_dates() {
                    let field = if self.draft.check_in.trim().is_empty() {
                        "check_in"
                    } else {
                        "check_out"
                    };
                    return Err(BookingError::validation(field, "date is required"));
                }
                if self.strict_dates {
                    validate_stay(&self.draft.check_in, &self.draft.check_out)?;
                }
                WizardStep::Review
            }
            WizardStep::Review => WizardStep::Payment,
            WizardStep::Payment => {
                return Err(BookingError::validation(
                    "step",
                    "confirm the payment to continue",
                ));
            }
            WizardStep::Success => {
                return Err(BookingError::validation("step", "booking is complete"));
            }
        };
        self.transition(next);
        Ok(next)
    }

    /// Moves one step back, keeping the draft. No effect from `Dates`,
    /// from `Success`, or while a payment is processing.
    pub fn back(&mut self) -> WizardStep {
        if self.is_processing() {
            return self.step;
        }
        let previous = match self.step {
            WizardStep::Review => WizardStep::Dates,
            WizardStep::Payment => WizardStep::Review,
            step => step,
        };
        if previous != self.step {
            self.transition(previous);
        }
        self.step
    }

    /// Enters the processing sub-state. Returns `None` if not in `Payment`
    /// or if an attempt is already in flight.
    pub fn begin_payment(&mut self) -> Option<PaymentAttempt> {
        if self.step != WizardStep::Payment || self.is_processing() {
            return None;
        }
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.processing = Some(ticket);

        let request = PaymentRequest {
            property_id: self.property.id.clone(),
            amount: self.pricing().total,
            method: self.draft.payment_method,
        };
        info!(ticket, amount = %request.amount, "payment processing");
        Some(PaymentAttempt { ticket, request })
    }

    /// Applies the gateway's answer for attempt `ticket`.
    ///
    /// Success moves to `Success`; failure leaves the wizard in `Payment`
    /// ready for another attempt.
    pub fn finish_payment(
        &mut self,
        ticket: u64,
        result: Result<PaymentReceipt>,
    ) -> PaymentOutcome {
        if self.processing != Some(ticket) {
            debug!(ticket, "ignoring stale payment completion");
            return PaymentOutcome::Stale;
        }
        self.processing = None;

        match result {
            Ok(receipt) => {
                self.transition(WizardStep::Success);
                PaymentOutcome::Completed(BookingConfirmation {
                    property_id: self.property.id.clone(),
                    property_name: self.property.name.clone(),
                    draft: self.draft.clone(),
                    pricing: self.pricing(),
                    reference: receipt.reference,
                })
            }
            Err(e) => {
                warn!(ticket, error = %e, "payment failed");
                PaymentOutcome::Failed(e.to_string())
            }
        }
    }

    /// Discards the draft and starts over at `Dates`. Any attempt in
    /// flight becomes stale.
    pub fn reset(&mut self) {
        self.step = WizardStep::Dates;
        self.draft = BookingDraft::default();
        self.processing = None;
    }

    fn require_step(&self, step: WizardStep, field: &'static str) -> Result<()> {
        if self.step == step {
            Ok(())
        } else {
            Err(BookingError::validation(
                field,
                format!("cannot be changed in step {:?}", self.step),
            ))
        }
    }

    fn transition(&mut self, next: WizardStep) {
        debug!(from = ?self.step, to = ?next, property = %self.property.id, "wizard transition");
        self.step = next;
    }
}
