use anyhow::Context;
use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::EmailDeliveryService;
use folio_models::contact::ContactSubmission;
use tracing::info;

use crate::environment::{ConfigProvider, Provider};

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test {
        /// Sender address passed to the email template
        #[arg(long, default_value = "deliverability-test@folio.example.dev")]
        email: String,
    },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { email } => test(config, email).await,
        }
    }
}

async fn test(config: Config, email: String) -> anyhow::Result<()> {
    let credentials = config
        .email
        .credentials()
        .context("Email delivery is not configured")?;
    let provider = Provider::new(ConfigProvider::new(&config)?)?;

    let submission = ContactSubmission::new(email, "Email deliverability seems to be working!");
    provider
        .email()
        .send(&credentials, &submission)
        .await
        .context("Failed to send test email")?;

    info!("Test email accepted by {}", config.email.endpoint);

    Ok(())
}
