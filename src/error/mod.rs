use thiserror::Error;

use crate::mailer::MailerError;
use crate::password::PasswordError;
use crate::welcome::WelcomeError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Mailer error: {0}")]
    Mailer(#[from] MailerError),

    #[error("Welcome email error: {0}")]
    Welcome(#[from] WelcomeError),

    #[error("Invalid account data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Stable code for logs and process output
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Password(_) => "PASSWORD_ERROR",
            AppError::Mailer(_) => "MAILER_ERROR",
            AppError::Welcome(_) => "WELCOME_ERROR",
            AppError::Json(_) => "INVALID_ACCOUNT",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
