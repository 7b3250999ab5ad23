mod settings;

pub use settings::{LogConfig, MailConfig, PasswordConfig, Settings, SmtpConfig};
