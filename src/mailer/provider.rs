//! Mail transport trait and error types

use async_trait::async_trait;
use thiserror::Error;

use super::types::{EmailMessage, SendReceipt};

/// Mail transport error types
#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Mail transport not configured")]
    NotConfigured,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Send failed: {0}")]
    SendFailed(String),
}

/// Outbound mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand a message to the transport
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, MailerError>;

    /// Transport name used in logs and receipts
    fn backend_name(&self) -> &'static str;
}
