// Core (pure, synchronous)
pub mod password;
pub mod plaintext;
pub mod template;

// Delivery
pub mod mailer;
pub mod welcome;

// Supporting modules
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;
