//! Outbound mail transports.
//!
//! - `Mailer`: async transport trait
//! - `SmtpMailer`: SMTP delivery through lettre
//! - `MemoryMailer`: records messages for dry runs and tests

mod factory;
mod memory;
mod provider;
mod smtp;
mod types;

pub use factory::create_mailer;
pub use memory::MemoryMailer;
pub use provider::{Mailer, MailerError};
pub use smtp::SmtpMailer;
pub use types::{EmailMessage, SendReceipt};
