use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

use crate::password::PasswordRequirement;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub smtp: SmtpConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Welcome message settings
#[derive(Debug, Clone, Deserialize)]
pub struct MailConfig {
    /// Send without an explicit request for every new account
    #[serde(default = "default_true")]
    pub automatic_email_send: bool,
    /// Sender address; nothing is sent while this is blank
    #[serde(default)]
    pub from_email: String,
    #[serde(default)]
    pub from_name: String,
    /// Comma-separated addresses also notified of new accounts
    #[serde(default)]
    pub bcc_email: String,
    /// Extra transport parameter, e.g. `-f bounce@example.com`
    #[serde(default)]
    pub additional_param: String,
    /// Generate a password when none was entered manually
    #[serde(default)]
    pub generate_password: bool,
    #[serde(default = "default_subject")]
    pub subject: String,
    /// HTML body with `{placeholder}` markers
    #[serde(default = "default_body")]
    pub body: String,
    /// Value of the `{adminUrl}` placeholder
    #[serde(default)]
    pub admin_url: String,
    /// `smtp` or `memory`
    #[serde(default = "default_transport")]
    pub transport: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    #[serde(default = "default_smtp_host")]
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub starttls: bool,
    #[serde(default = "default_smtp_timeout")]
    pub timeout_seconds: u64,
}

/// Password field policy used when generating passwords
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default = "default_requirements")]
    pub requirements: Vec<PasswordRequirement>,
    /// Dash-separated groups of floor(sqrt(length)) characters
    #[serde(default)]
    pub grouped: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_true() -> bool {
    true
}

fn default_subject() -> String {
    "Welcome".to_string()
}

fn default_body() -> String {
    "<p>Welcome {first_name} {last_name}</p>\n\
     <p>Please login in at: <a href=\"{adminUrl}\">{adminUrl}</a></p>\n\
     <p>Username: {name}</p>\n\
     <p>Password: {pass}</p>\n\
     <p>If you have any questions, please email us at: {fromEmail}</p>"
        .to_string()
}

fn default_transport() -> String {
    "smtp".to_string()
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    25
}

fn default_smtp_timeout() -> u64 {
    30
}

fn default_min_length() -> usize {
    12
}

fn default_requirements() -> Vec<PasswordRequirement> {
    vec![PasswordRequirement::Letter, PasswordRequirement::Digit]
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("mail.automatic_email_send", true)?
            .set_default("mail.transport", "smtp")?
            .set_default("smtp.host", "localhost")?
            .set_default("smtp.port", 25)?
            .set_default("password.min_length", 12)?
            .set_default("log.format", "pretty")?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // WELCOME_MAIL__FROM_EMAIL, WELCOME_SMTP__HOST, WELCOME_PASSWORD__REQUIREMENTS, ...
            .add_source(
                Environment::with_prefix("WELCOME")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("password.requirements"),
            );

        builder.build()?.try_deserialize()
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            automatic_email_send: default_true(),
            from_email: String::new(),
            from_name: String::new(),
            bcc_email: String::new(),
            additional_param: String::new(),
            generate_password: false,
            subject: default_subject(),
            body: default_body(),
            admin_url: String::new(),
            transport: default_transport(),
        }
    }
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            starttls: false,
            timeout_seconds: default_smtp_timeout(),
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            requirements: default_requirements(),
            grouped: false,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: default_log_format(),
            filter: default_log_filter(),
        }
    }
}
