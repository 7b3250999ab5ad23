//! Outgoing message and delivery receipt types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A composed email ready for a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    /// Primary recipients
    pub to: Vec<String>,

    /// Blind copy recipients (e.g. admins notified of new accounts)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,

    pub from_email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,

    pub subject: String,

    pub html_body: String,

    /// Plain-text alternative of `html_body`
    pub text_body: String,

    /// SMTP envelope sender, when it differs from `from_email`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub envelope_sender: Option<String>,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        from_email: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
        text_body: impl Into<String>,
    ) -> Self {
        Self {
            to: vec![to.into()],
            bcc: Vec::new(),
            from_email: from_email.into(),
            from_name: None,
            subject: subject.into(),
            html_body: html_body.into(),
            text_body: text_body.into(),
            envelope_sender: None,
        }
    }

    pub fn with_from_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.from_name = if name.is_empty() { None } else { Some(name) };
        self
    }

    pub fn with_bcc(mut self, bcc: Vec<String>) -> Self {
        self.bcc = bcc;
        self
    }

    pub fn with_envelope_sender(mut self, sender: Option<String>) -> Self {
        self.envelope_sender = sender;
        self
    }

    /// Every address the message is delivered to
    pub fn recipients(&self) -> impl Iterator<Item = &str> {
        self.to.iter().chain(self.bcc.iter()).map(String::as_str)
    }
}

/// Result of a successful hand-off to a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendReceipt {
    /// Transport that accepted the message
    pub backend: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    pub sent_at: DateTime<Utc>,
}

impl SendReceipt {
    pub fn new(backend: &'static str, message_id: Option<String>) -> Self {
        Self {
            backend,
            message_id,
            sent_at: Utc::now(),
        }
    }
}
