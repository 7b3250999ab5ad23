//! Prometheus metrics for welcome email delivery.
//!
//! - Sent and failed sends
//! - Skipped sends by reason
//! - Generated passwords

mod helpers;

pub use helpers::{encode_metrics, WelcomeMetrics};

use lazy_static::lazy_static;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "welcome";

lazy_static! {
    /// Welcome emails accepted by the transport
    pub static ref EMAILS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_emails_sent_total", METRIC_PREFIX),
        "Total welcome emails accepted by the mail transport",
        &["kind"]
    ).unwrap();

    /// Welcome emails that could not be sent
    pub static ref EMAILS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_emails_failed_total", METRIC_PREFIX),
        "Total welcome emails that failed validation or delivery",
        &["reason"]
    ).unwrap();

    /// Accounts for which no email was attempted
    pub static ref EMAILS_SKIPPED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_emails_skipped_total", METRIC_PREFIX),
        "Total accounts skipped without sending",
        &["reason"]
    ).unwrap();

    /// Passwords generated for new accounts
    pub static ref PASSWORDS_GENERATED_TOTAL: IntCounter = register_int_counter!(
        format!("{}_passwords_generated_total", METRIC_PREFIX),
        "Total passwords generated for accounts"
    ).unwrap();
}
