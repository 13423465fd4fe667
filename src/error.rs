use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Validation error on {field}: {reason}")]
    ValidationError { field: &'static str, reason: String },
    #[error("Payment error: {0}")]
    PaymentError(String),
    #[error("Booking cancelled before completion")]
    CancelledError,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Cipher error: {0}")]
    CipherError(String),
}

impl BookingError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
