use anyhow::bail;
use clap::Subcommand;
use folio_config::Config;
use folio_core_contact_contracts::{
    ContactFormService, ContactFormView, SubmissionFailure, SubmissionState, SubmitOutcome,
};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

use crate::environment::{ConfigProvider, Provider};

pub const SUCCESS_BANNER: &str =
    "Your message has been sent successfully! I'll get back to you soon.";

const NOT_CONFIGURED_HINT: &str = "Set email.service_id, email.template_id and email.public_key \
                                   in the config file or the FOLIO_EMAIL__SERVICE_ID, \
                                   FOLIO_EMAIL__TEMPLATE_ID and FOLIO_EMAIL__PUBLIC_KEY \
                                   environment variables.";

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Submit a single message through the contact form
    Send {
        /// Email address of the sender
        #[arg(long)]
        email: String,
        /// The message
        #[arg(long)]
        message: String,
    },
    /// Fill in and submit the contact form interactively
    Compose,
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let provider = Provider::new(ConfigProvider::new(&config)?)?;

        match self {
            ContactCommand::Send { email, message } => {
                let banner = send(&provider, email, message).await?;
                println!("{banner}");
                Ok(())
            }
            ContactCommand::Compose => compose(&provider).await,
        }
    }
}

/// Submits one message and returns the success banner.
pub async fn send(provider: &Provider, email: String, message: String) -> anyhow::Result<String> {
    let form = provider.contact_form();
    form.set_email(email);
    form.set_message(message);

    match form.submit().await {
        SubmitOutcome::Sent => Ok(SUCCESS_BANNER.into()),
        SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => {
            bail!(banner(&form.view()).unwrap_or_default())
        }
    }
}

/// Text shown below the form for the given state, if any.
pub fn banner(view: &ContactFormView) -> Option<String> {
    match view.state {
        SubmissionState::Idle => None,
        SubmissionState::Submitting => Some("Sending...".into()),
        SubmissionState::Success => Some(SUCCESS_BANNER.into()),
        SubmissionState::Failure(failure @ SubmissionFailure::NotConfigured) => {
            Some(format!("{failure}\n{NOT_CONFIGURED_HINT}"))
        }
        SubmissionState::Failure(failure) => Some(failure.to_string()),
    }
}

async fn compose(provider: &Provider) -> anyhow::Result<()> {
    let form = provider.contact_form();

    let mut updates = form.subscribe();
    let printer = tokio::spawn(async move {
        let mut last = updates.borrow_and_update().state;
        while updates.changed().await.is_ok() {
            let view = updates.borrow_and_update().clone();
            if view.state == last {
                continue;
            }
            match banner(&view) {
                Some(banner) => println!("{banner}"),
                None if last == SubmissionState::Success => println!("Ready for a new message."),
                None => {}
            }
            last = view.state;
        }
    });

    let mut lines = BufReader::new(stdin()).lines();
    loop {
        println!("My mail address is:");
        let Some(email) = lines.next_line().await? else {
            break;
        };

        println!("Your message (finish with an empty line):");
        let mut message = Vec::new();
        while let Some(line) = lines.next_line().await? {
            if line.is_empty() {
                break;
            }
            message.push(line);
        }

        form.set_email(email);
        form.set_message(message.join("\n"));
        form.submit().await;
    }

    printer.abort();
    Ok(())
}
