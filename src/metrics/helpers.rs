//! Metrics helper for convenient recording

use prometheus::{Encoder, TextEncoder};

use super::{
    EMAILS_FAILED_TOTAL, EMAILS_SENT_TOTAL, EMAILS_SKIPPED_TOTAL, PASSWORDS_GENERATED_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording welcome email metrics
pub struct WelcomeMetrics;

impl WelcomeMetrics {
    /// `kind` is `welcome` or `test`
    pub fn record_sent(kind: &str) {
        EMAILS_SENT_TOTAL.with_label_values(&[kind]).inc();
    }

    pub fn record_failed(reason: &str) {
        EMAILS_FAILED_TOTAL.with_label_values(&[reason]).inc();
    }

    pub fn record_skipped(reason: &str) {
        EMAILS_SKIPPED_TOTAL.with_label_values(&[reason]).inc();
    }

    pub fn record_password_generated() {
        PASSWORDS_GENERATED_TOTAL.inc();
    }
}
