use super::booking::{PaymentReceipt, PaymentRequest};
use super::property::Property;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only source of bookable properties.
#[async_trait]
pub trait PropertyCatalog: Send + Sync {
    async fn get(&self, property_id: &str) -> Result<Option<Property>>;
    async fn all(&self) -> Result<Vec<Property>>;
}

/// Charges a guest for a stay.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &PaymentRequest) -> Result<PaymentReceipt>;
}

/// Seals and opens direct messages. The crate ships no algorithm for this.
pub trait MessageCipher: Send + Sync {
    fn seal(&self, plaintext: &str) -> Result<Vec<u8>>;
    fn open(&self, sealed: &[u8]) -> Result<String>;
}

pub type PropertyCatalogBox = Box<dyn PropertyCatalog>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type MessageCipherBox = Box<dyn MessageCipher>;
