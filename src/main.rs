use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use welcome_mail_service::config::Settings;
use welcome_mail_service::mailer::create_mailer;
use welcome_mail_service::telemetry;
use welcome_mail_service::welcome::{NewAccount, WelcomeConfig, WelcomeMailer};

#[derive(Parser)]
#[command(name = "welcome-mail-service")]
#[command(about = "Send the welcome email for a new CMS account", long_about = None)]
struct Cli {
    /// Send a test message with a placeholder password, ignoring send gating
    #[arg(long)]
    test: bool,

    /// Account JSON file; read from stdin when omitted
    account: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    telemetry::init_tracing(&settings.log)?;
    tracing::info!("Configuration loaded");

    let account = match &cli.account {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("cannot open {}", path.display()))?;
            NewAccount::from_reader(BufReader::new(file))?
        }
        None => NewAccount::from_reader(io::stdin().lock())?,
    };

    let mailer = create_mailer(&settings.mail.transport, &settings.smtp)?;
    let welcome = WelcomeMailer::new(WelcomeConfig::from_settings(&settings), mailer);

    let outcome = if cli.test {
        welcome.send_test(&account).await?
    } else {
        welcome.process(&account).await?
    };

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
