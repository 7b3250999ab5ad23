//! Welcome email orchestration.
//!
//! Replaces save hooks with an explicit pipeline called by the account
//! creation workflow:
//!
//! 1. decide whether to send (explicit request, automatic send, re-send)
//! 2. take the manual password or generate one
//! 3. purify and render the HTML body
//! 4. build the plain-text alternative
//! 5. hand both parts to the mailer
//!
//! # Example
//!
//! ```ignore
//! let welcome = WelcomeMailer::new(WelcomeConfig::from_settings(&settings), mailer);
//! let account = NewAccount::new("alice", "alice@example.com").with_field("first_name", "Alice");
//!
//! match welcome.process(&account).await? {
//!     WelcomeOutcome::Sent { generated_password, .. } => store_password(generated_password),
//!     WelcomeOutcome::Skipped { reason } => tracing::debug!(?reason, "skipped"),
//! }
//! ```

mod pipeline;
mod types;

pub use pipeline::{PreparedEmail, WelcomeMailer, TEST_PASSWORD};
pub use types::{
    envelope_sender, split_addresses, AccountState, NewAccount, SkipReason, WelcomeConfig,
    WelcomeError, WelcomeOutcome,
};
