use crate::domain::booking::BookingConfirmation;
use crate::domain::draft::{BookingDraft, PaymentMethod};
use crate::domain::ports::PaymentGatewayRef;
use crate::domain::pricing::{PriceBreakdown, PricingPolicy};
use crate::domain::property::Property;
use crate::domain::wizard::{BookingWizard, PaymentOutcome, WizardStep};
use crate::error::{BookingError, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Tunables for a booking session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    pub policy: PricingPolicy,
    pub strict_dates: bool,
}

/// Notifications sent to whoever opened the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Completed(BookingConfirmation),
    PaymentFailed(String),
    /// The session was closed while a payment was processing.
    Cancelled,
    Closed,
}

/// One open booking wizard plus its in-flight payment.
///
/// The payment runs as a spawned task. Closing or dropping the session
/// aborts that task, and the wizard's attempt ticket keeps a late completion
/// from touching a discarded draft.
pub struct BookingSession {
    wizard: Arc<Mutex<BookingWizard>>,
    gateway: PaymentGatewayRef,
    events: mpsc::UnboundedSender<SessionEvent>,
    pending: Option<JoinHandle<()>>,
}

impl BookingSession {
    /// Opens a wizard for `property`. The receiver yields the session's events.
    pub fn open(
        property: Property,
        gateway: PaymentGatewayRef,
        config: SessionConfig,
    ) -> (Self, mpsc::UnboundedReceiver<SessionEvent>) {
        info!(property = %property.id, "booking session opened");
        let wizard = BookingWizard::new(property)
            .with_policy(config.policy)
            .with_strict_dates(config.strict_dates);
        let (events, receiver) = mpsc::unbounded_channel();

        let session = Self {
            wizard: Arc::new(Mutex::new(wizard)),
            gateway,
            events,
            pending: None,
        };
        (session, receiver)
    }

    pub async fn step(&self) -> WizardStep {
        self.wizard.lock().await.step()
    }

    pub async fn draft(&self) -> BookingDraft {
        self.wizard.lock().await.draft().clone()
    }

    pub async fn pricing(&self) -> PriceBreakdown {
        self.wizard.lock().await.pricing()
    }

    pub async fn is_processing(&self) -> bool {
        self.wizard.lock().await.is_processing()
    }

    pub async fn set_dates(&self, check_in: &str, check_out: &str) -> Result<()> {
        let mut wizard = self.wizard.lock().await;
        wizard.set_check_in(check_in)?;
        wizard.set_check_out(check_out)
    }

    /// Sets the guest count by stepping the clamped counter, as the UI does.
    pub async fn set_guests(&self, guests: u8) -> Result<u8> {
        let mut wizard = self.wizard.lock().await;
        let mut current = wizard.draft().guests.get();
        while current < guests {
            let next = wizard.increment_guests()?;
            if next == current {
                break;
            }
            current = next;
        }
        while current > guests {
            let next = wizard.decrement_guests()?;
            if next == current {
                break;
            }
            current = next;
        }
        Ok(current)
    }

    pub async fn set_payment_method(&self, method: PaymentMethod) -> Result<()> {
        self.wizard.lock().await.set_payment_method(method)
    }

    pub async fn forward(&self) -> Result<WizardStep> {
        self.wizard.lock().await.forward()
    }

    pub async fn back(&self) -> WizardStep {
        self.wizard.lock().await.back()
    }

    /// Starts the payment. Returns `false` (and does nothing) unless the
    /// wizard is in `Payment` with no attempt already processing.
    pub async fn confirm_payment(&mut self) -> bool {
        let Some(attempt) = self.wizard.lock().await.begin_payment() else {
            return false;
        };

        let wizard = Arc::clone(&self.wizard);
        let gateway = Arc::clone(&self.gateway);
        let events = self.events.clone();

        self.pending = Some(tokio::spawn(async move {
            let result = gateway.charge(&attempt.request).await;
            let outcome = wizard.lock().await.finish_payment(attempt.ticket, result);
            let event = match outcome {
                PaymentOutcome::Completed(confirmation) => {
                    info!(reference = %confirmation.reference, "booking confirmed");
                    SessionEvent::Completed(confirmation)
                }
                PaymentOutcome::Failed(reason) => SessionEvent::PaymentFailed(reason),
                PaymentOutcome::Stale => return,
            };
            // The host may have stopped listening.
            let _ = events.send(event);
        }));
        true
    }

    /// Waits for the in-flight payment, if any, and reports its outcome.
    pub async fn wait_for_payment(&mut self) -> Result<WizardStep> {
        if let Some(handle) = self.pending.take() {
            handle.await.map_err(|e| {
                if e.is_cancelled() {
                    BookingError::CancelledError
                } else {
                    BookingError::PaymentError(format!("payment task failed: {e}"))
                }
            })?;
        }
        let wizard = self.wizard.lock().await;
        match wizard.step() {
            WizardStep::Payment => Err(BookingError::PaymentError(
                "payment was not completed".to_string(),
            )),
            step => Ok(step),
        }
    }

    /// Closes the wizard, cancelling any processing payment and discarding
    /// the draft. The session can be used again from `Dates`.
    pub async fn close(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let mut wizard = self.wizard.lock().await;
        if wizard.is_processing() {
            warn!(property = %wizard.property().id, "closed while payment was processing");
            let _ = self.events.send(SessionEvent::Cancelled);
        }
        wizard.reset();
        info!(property = %wizard.property().id, "booking session closed");
        let _ = self.events.send(SessionEvent::Closed);
    }
}

impl Drop for BookingSession {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
