//! Account, configuration and outcome types for the welcome pipeline

use std::io::Read;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::mailer::{MailerError, SendReceipt};
use crate::password::{PasswordError, PasswordPolicy};
use crate::template::{RecordLookup, UserRecord};

/// Welcome pipeline error
#[derive(Debug, Error)]
pub enum WelcomeError {
    #[error("No email was sent to {name} because either their email address or password was not set")]
    MissingCredentials { name: String },

    #[error("No sender address configured")]
    MissingSender,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Mailer(#[from] MailerError),
}

impl WelcomeError {
    /// Metric label for this failure
    pub fn reason(&self) -> &'static str {
        match self {
            WelcomeError::MissingCredentials { .. } => "missing_credentials",
            WelcomeError::MissingSender => "missing_sender",
            WelcomeError::Password(_) => "password",
            WelcomeError::Mailer(_) => "transport",
        }
    }
}

/// Whether the account is being created or already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountState {
    #[default]
    New,
    Existing,
}

/// The account a welcome message is composed for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewAccount {
    /// Login name, also available as `{name}`
    pub name: String,

    /// Recipient address, also available as `{email}`
    #[serde(default)]
    pub email: String,

    /// Password entered manually for the account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Message body overriding the configured one for this account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub state: AccountState,

    /// Explicit send request; `None` defers to automatic sending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_email: Option<bool>,

    /// Remaining account fields available as placeholders
    #[serde(default)]
    pub fields: UserRecord,
}

impl NewAccount {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Read an account from JSON
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let account: NewAccount = serde_json::from_reader(reader)?;
        if account.name.trim().is_empty() {
            return Err(AppError::Validation("account name is empty".to_string()));
        }
        Ok(account)
    }

    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field, value);
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_send_email(mut self, send: bool) -> Self {
        self.send_email = Some(send);
        self
    }

    pub fn existing(mut self) -> Self {
        self.state = AccountState::Existing;
        self
    }

    /// Manually entered password, ignoring blanks
    pub fn manual_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl RecordLookup for NewAccount {
    fn field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            other => self.fields.field(other),
        }
    }
}

/// Immutable configuration of the welcome pipeline
#[derive(Debug, Clone)]
pub struct WelcomeConfig {
    pub automatic_email_send: bool,
    pub generate_password: bool,
    pub from_email: String,
    pub from_name: String,
    pub bcc: Vec<String>,
    pub envelope_sender: Option<String>,
    pub subject: String,
    pub body: String,
    pub admin_url: String,
    pub password_policy: PasswordPolicy,
}

impl WelcomeConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let mail = &settings.mail;
        Self {
            automatic_email_send: mail.automatic_email_send,
            generate_password: mail.generate_password,
            from_email: mail.from_email.trim().to_string(),
            from_name: mail.from_name.trim().to_string(),
            bcc: split_addresses(&mail.bcc_email),
            envelope_sender: envelope_sender(&mail.additional_param),
            subject: mail.subject.clone(),
            body: mail.body.clone(),
            admin_url: mail.admin_url.clone(),
            password_policy: PasswordPolicy {
                min_length: settings.password.min_length,
                requirements: settings.password.requirements.clone(),
                grouped: settings.password.grouped,
            },
        }
    }
}

/// Split a comma-separated address list, dropping blanks
pub fn split_addresses(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Envelope sender from a sendmail style `-f address` parameter
pub fn envelope_sender(param: &str) -> Option<String> {
    let rest = param.trim().strip_prefix("-f")?.trim();
    if rest.is_empty() || rest.contains(char::is_whitespace) {
        return None;
    }
    Some(rest.to_string())
}

/// Why no message was attempted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// No explicit request and automatic sending is off
    NotRequested,
    /// The account already exists and no re-send was requested
    AlreadyExists,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::NotRequested => "not_requested",
            SkipReason::AlreadyExists => "already_exists",
        }
    }
}

/// Result of processing one account
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WelcomeOutcome {
    Sent {
        receipt: SendReceipt,
        /// Password generated for the account; the caller persists it
        #[serde(skip_serializing_if = "Option::is_none")]
        generated_password: Option<String>,
    },
    Skipped {
        reason: SkipReason,
    },
}

impl WelcomeOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, WelcomeOutcome::Sent { .. })
    }
}
