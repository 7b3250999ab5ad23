//! Welcome email pipeline: password -> render -> plain text -> send

use std::sync::Arc;

use crate::mailer::{EmailMessage, Mailer, SendReceipt};
use crate::metrics::WelcomeMetrics;
use crate::password;
use crate::plaintext::{BasicSanitizer, PlainTextDowngrader, Sanitizer};
use crate::template::{render, RecordLookup, ReservedValues};

use super::types::{
    AccountState, NewAccount, SkipReason, WelcomeConfig, WelcomeError, WelcomeOutcome,
};

/// Password shown in test messages
pub const TEST_PASSWORD: &str = "password";

/// A composed message plus the password that went into it
#[derive(Debug, Clone)]
pub struct PreparedEmail {
    pub message: EmailMessage,
    /// Set when the password was generated rather than entered
    pub generated_password: Option<String>,
}

/// Sends welcome messages for new accounts
pub struct WelcomeMailer {
    config: WelcomeConfig,
    mailer: Arc<dyn Mailer>,
    sanitizer: Arc<dyn Sanitizer>,
    downgrader: PlainTextDowngrader,
}

impl WelcomeMailer {
    /// Create a pipeline with the default sanitizer
    pub fn new(config: WelcomeConfig, mailer: Arc<dyn Mailer>) -> Self {
        Self::with_sanitizer(config, mailer, Arc::new(BasicSanitizer::default()))
    }

    pub fn with_sanitizer(
        config: WelcomeConfig,
        mailer: Arc<dyn Mailer>,
        sanitizer: Arc<dyn Sanitizer>,
    ) -> Self {
        Self {
            config,
            mailer,
            downgrader: PlainTextDowngrader::new(sanitizer.clone()),
            sanitizer,
        }
    }

    pub fn config(&self) -> &WelcomeConfig {
        &self.config
    }

    /// Decide whether a message should go out for this account
    pub fn should_send(&self, account: &NewAccount) -> Result<(), SkipReason> {
        if account.state == AccountState::Existing && account.send_email != Some(true) {
            return Err(SkipReason::AlreadyExists);
        }
        if !account
            .send_email
            .unwrap_or(self.config.automatic_email_send)
        {
            return Err(SkipReason::NotRequested);
        }
        Ok(())
    }

    /// Compose the welcome message without sending it
    pub fn prepare(&self, account: &NewAccount) -> Result<PreparedEmail, WelcomeError> {
        if account.email.trim().is_empty() {
            return Err(WelcomeError::MissingCredentials {
                name: account.name.clone(),
            });
        }

        let (pass, generated_password) = match account.manual_password() {
            Some(manual) => (manual.to_string(), None),
            None if self.config.generate_password => {
                let spec = self.config.password_policy.spec();
                let generated = password::generate(spec.length, spec.grouped, spec.sets)?;
                WelcomeMetrics::record_password_generated();
                tracing::info!(account = %account.name, "Generated password for account");
                (generated.clone(), Some(generated))
            }
            None => (String::new(), None),
        };

        let body = account
            .message
            .as_deref()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(&self.config.body);

        if pass.is_empty() {
            return Err(WelcomeError::MissingCredentials {
                name: account.name.clone(),
            });
        }

        let message = self.compose(&account.email, body, &pass, account)?;
        Ok(PreparedEmail {
            message,
            generated_password,
        })
    }

    /// Run the full pipeline for one account
    pub async fn process(&self, account: &NewAccount) -> Result<WelcomeOutcome, WelcomeError> {
        if let Err(reason) = self.should_send(account) {
            WelcomeMetrics::record_skipped(reason.as_str());
            tracing::debug!(account = %account.name, reason = reason.as_str(), "Welcome email skipped");
            return Ok(WelcomeOutcome::Skipped { reason });
        }

        let prepared = self.prepare(account).inspect_err(|e| {
            WelcomeMetrics::record_failed(e.reason());
            tracing::warn!(account = %account.name, error = %e, "Welcome email not sent");
        })?;

        let receipt = self.deliver(&prepared.message, "welcome").await?;
        tracing::info!(
            account = %account.name,
            backend = receipt.backend,
            "Welcome email sent"
        );

        Ok(WelcomeOutcome::Sent {
            receipt,
            generated_password: prepared.generated_password,
        })
    }

    /// Send the configured message to `recipient` with a placeholder password
    pub async fn send_test(&self, recipient: &NewAccount) -> Result<WelcomeOutcome, WelcomeError> {
        if recipient.email.trim().is_empty() {
            return Err(WelcomeError::MissingCredentials {
                name: recipient.name.clone(),
            });
        }

        let message = self.compose(&recipient.email, &self.config.body, TEST_PASSWORD, recipient)?;
        let receipt = self.deliver(&message, "test").await?;
        tracing::info!(recipient = %recipient.email, "Test email sent");

        Ok(WelcomeOutcome::Sent {
            receipt,
            generated_password: None,
        })
    }

    fn compose<R>(
        &self,
        to: &str,
        body: &str,
        pass: &str,
        record: &R,
    ) -> Result<EmailMessage, WelcomeError>
    where
        R: RecordLookup + ?Sized,
    {
        if self.config.from_email.is_empty() {
            return Err(WelcomeError::MissingSender);
        }

        let reserved = ReservedValues::new(pass, &self.config.admin_url, &self.config.from_email);
        let html_body = render(&self.sanitizer.purify(body), &reserved, record);
        let text_body = self.downgrader.downgrade(&html_body);

        Ok(EmailMessage::new(
            to.trim(),
            &self.config.from_email,
            &self.config.subject,
            html_body,
            text_body,
        )
        .with_from_name(&self.config.from_name)
        .with_bcc(self.config.bcc.clone())
        .with_envelope_sender(self.config.envelope_sender.clone()))
    }

    async fn deliver(
        &self,
        message: &EmailMessage,
        kind: &str,
    ) -> Result<SendReceipt, WelcomeError> {
        match self.mailer.send(message).await {
            Ok(receipt) => {
                WelcomeMetrics::record_sent(kind);
                Ok(receipt)
            }
            Err(e) => {
                WelcomeMetrics::record_failed("transport");
                tracing::error!(
                    backend = self.mailer.backend_name(),
                    error = %e,
                    "Failed to send welcome email"
                );
                Err(e.into())
            }
        }
    }
}
