//! In-memory mailer that records messages instead of delivering them

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::provider::{Mailer, MailerError};
use super::types::{EmailMessage, SendReceipt};

/// Mailer for dry runs and tests
#[derive(Debug, Default)]
pub struct MemoryMailer {
    outbox: Mutex<Vec<EmailMessage>>,
    fail: AtomicBool,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent sends fail (or succeed again)
    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::Relaxed);
    }

    /// Messages accepted so far, oldest first
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.outbox().clone()
    }

    pub fn count(&self) -> usize {
        self.outbox().len()
    }

    pub fn clear(&self) {
        self.outbox().clear();
    }

    fn outbox(&self) -> MutexGuard<'_, Vec<EmailMessage>> {
        self.outbox.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, MailerError> {
        if self.fail.load(Ordering::Relaxed) {
            return Err(MailerError::SendFailed("memory mailer set to fail".to_string()));
        }
        if message.to.is_empty() {
            return Err(MailerError::InvalidAddress("No recipients specified".to_string()));
        }

        self.outbox().push(message.clone());

        let message_id = Uuid::new_v4().to_string();
        tracing::debug!(message_id = %message_id, to = ?message.to, "Message stored in memory outbox");

        Ok(SendReceipt::new(self.backend_name(), Some(message_id)))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
