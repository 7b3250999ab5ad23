//! Mailer factory

use std::sync::Arc;

use crate::config::SmtpConfig;

use super::memory::MemoryMailer;
use super::provider::{Mailer, MailerError};
use super::smtp::SmtpMailer;

/// Create a mailer based on the configured transport name.
///
/// - `"smtp"`: an [`SmtpMailer`] built from `smtp`
/// - `"memory"`: a [`MemoryMailer`] that only records messages
///
/// Unknown names fall back to the memory mailer so nothing leaves the process.
pub fn create_mailer(transport: &str, smtp: &SmtpConfig) -> Result<Arc<dyn Mailer>, MailerError> {
    match transport {
        "smtp" => {
            tracing::info!(
                transport = "smtp",
                host = %smtp.host,
                port = smtp.port,
                starttls = smtp.starttls,
                "Creating SMTP mailer"
            );
            Ok(Arc::new(SmtpMailer::from_config(smtp)?))
        }
        "memory" => {
            tracing::info!(transport = "memory", "Creating in-memory mailer");
            Ok(Arc::new(MemoryMailer::new()))
        }
        other => {
            tracing::warn!(
                transport = %other,
                "Unknown mail transport requested, falling back to memory"
            );
            Ok(Arc::new(MemoryMailer::new()))
        }
    }
}
