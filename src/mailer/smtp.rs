//! SMTP transport using lettre

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    address::Envelope,
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::SmtpConfig;

use super::provider::{Mailer, MailerError};
use super::types::{EmailMessage, SendReceipt};

/// SMTP-backed mailer
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a mailer from SMTP settings
    pub fn from_config(config: &SmtpConfig) -> Result<Self, MailerError> {
        if config.host.is_empty() {
            return Err(MailerError::NotConfigured);
        }

        let mut builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailerError::Connection(e.to_string()))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        builder = builder
            .port(config.port)
            .timeout(Some(Duration::from_secs(config.timeout_seconds)));

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(username.clone(), password.clone()));
        }

        Ok(Self {
            transport: builder.build(),
        })
    }

    fn build_message(message: &EmailMessage) -> Result<Message, MailerError> {
        let from = mailbox(message.from_name.as_deref(), &message.from_email)?;

        let mut builder = Message::builder().from(from).subject(&message.subject);

        for to in &message.to {
            builder = builder.to(mailbox(None, to)?);
        }
        for bcc in &message.bcc {
            builder = builder.bcc(mailbox(None, bcc)?);
        }

        builder
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(message.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(message.html_body.clone()),
                    ),
            )
            .map_err(|e| MailerError::Build(e.to_string()))
    }
}

fn parse_address(address: &str) -> Result<Address, MailerError> {
    address
        .trim()
        .parse::<Address>()
        .map_err(|e| MailerError::InvalidAddress(format!("{}: {}", address, e)))
}

fn mailbox(name: Option<&str>, address: &str) -> Result<Mailbox, MailerError> {
    Ok(Mailbox::new(name.map(str::to_string), parse_address(address)?))
}

fn classify(error: lettre::transport::smtp::Error) -> MailerError {
    let error_msg = error.to_string();
    if error_msg.contains("authentication") || error_msg.contains("AUTH") {
        MailerError::Authentication(error_msg)
    } else if error_msg.contains("connection") || error_msg.contains("timed out") {
        MailerError::Connection(error_msg)
    } else {
        MailerError::SendFailed(error_msg)
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: &EmailMessage) -> Result<SendReceipt, MailerError> {
        if message.to.is_empty() {
            return Err(MailerError::InvalidAddress("No recipients specified".to_string()));
        }

        let email = Self::build_message(message)?;

        let response = match &message.envelope_sender {
            Some(sender) => {
                let recipients = message
                    .recipients()
                    .map(parse_address)
                    .collect::<Result<Vec<_>, _>>()?;
                let envelope = Envelope::new(Some(parse_address(sender)?), recipients)
                    .map_err(|e| MailerError::Build(e.to_string()))?;

                self.transport
                    .send_raw(&envelope, &email.formatted())
                    .await
            }
            None => self.transport.send(email).await,
        }
        .map_err(classify)?;

        let message_id = response.message().next().map(|s| s.to_string());
        Ok(SendReceipt::new(self.backend_name(), message_id))
    }

    fn backend_name(&self) -> &'static str {
        "smtp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_smtp_config() -> SmtpConfig {
        SmtpConfig {
            host: "localhost".to_string(),
            port: 1025,
            username: None,
            password: None,
            starttls: false,
            timeout_seconds: 5,
        }
    }

    fn test_message() -> EmailMessage {
        EmailMessage::new(
            "alice@cms.test",
            "team@cms.test",
            "Welcome",
            "<p>Hello</p>",
            "Hello",
        )
        .with_from_name("CMS Team")
        .with_bcc(vec!["admin@cms.test".to_string()])
    }

    #[test]
    fn test_smtp_mailer_creation() {
        let mailer = SmtpMailer::from_config(&test_smtp_config()).unwrap();
        assert_eq!(mailer.backend_name(), "smtp");
    }

    #[test]
    fn test_smtp_mailer_with_auth() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            username: Some("user@example.com".to_string()),
            password: Some("password".to_string()),
            starttls: true,
            timeout_seconds: 30,
        };

        assert!(SmtpMailer::from_config(&config).is_ok());
    }

    #[test]
    fn test_empty_host_not_configured() {
        let config = SmtpConfig {
            host: String::new(),
            ..test_smtp_config()
        };

        assert!(matches!(
            SmtpMailer::from_config(&config),
            Err(MailerError::NotConfigured)
        ));
    }

    #[test]
    fn test_build_message_is_multipart() {
        let email = SmtpMailer::build_message(&test_message()).unwrap();
        let raw = String::from_utf8(email.formatted()).unwrap();

        assert!(raw.contains("multipart/alternative"));
        assert!(raw.contains("text/plain"));
        assert!(raw.contains("text/html"));
        assert!(raw.contains("Subject: Welcome"));
    }

    #[test]
    fn test_build_message_rejects_bad_address() {
        let mut message = test_message();
        message.to = vec!["not-an-address".to_string()];

        assert!(matches!(
            SmtpMailer::build_message(&message),
            Err(MailerError::InvalidAddress(_))
        ));
    }
}
