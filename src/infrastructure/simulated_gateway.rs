use crate::domain::booking::{PaymentReceipt, PaymentRequest};
use crate::domain::ports::PaymentGateway;
use crate::error::{BookingError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PAYMENT_DELAY: Duration = Duration::from_millis(2000);

/// Stand-in for a real payment provider.
///
/// Waits a fixed delay and approves the charge. It can be told to decline
/// the first few attempts, which is how the retry path gets exercised.
#[derive(Debug)]
pub struct SimulatedPaymentGateway {
    delay: Duration,
    declines_left: AtomicU32,
    issued: AtomicU64,
}

impl Default for SimulatedPaymentGateway {
    fn default() -> Self {
        Self::new(DEFAULT_PAYMENT_DELAY)
    }
}

impl SimulatedPaymentGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            declines_left: AtomicU32::new(0),
            issued: AtomicU64::new(0),
        }
    }

    pub fn decline_first(self, attempts: u32) -> Self {
        self.declines_left.store(attempts, Ordering::SeqCst);
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl PaymentGateway for SimulatedPaymentGateway {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt> {
        debug!(property = %request.property_id, amount = %request.amount, "simulated charge");
        tokio::time::sleep(self.delay).await;

        let declined = self
            .declines_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .is_ok();
        if declined {
            return Err(BookingError::PaymentError(
                "card declined by simulated gateway".to_string(),
            ));
        }

        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PaymentReceipt {
            reference: format!("TBNB-{n:06}"),
        })
    }
}
