use folio_config::Config;
use folio_core_contact_impl::{ContactFormServiceConfig, ContactFormServiceImpl};
use folio_email_impl::{EmailJsServiceConfig, EmailJsServiceImpl};
use tracing::warn;
use types::{ContactForm, Email};

pub mod types;

/// Provides the services used by the commands.
#[derive(Debug, Clone)]
pub struct Provider {
    config: ConfigProvider,
    email: Email,
}

impl Provider {
    pub fn new(config: ConfigProvider) -> anyhow::Result<Self> {
        let email = EmailJsServiceImpl::new(config.emailjs_service_config.clone())?;
        Ok(Self::with_email(config, email))
    }

    pub fn with_email(config: ConfigProvider, email: Email) -> Self {
        Self { config, email }
    }

    pub fn email(&self) -> Email {
        self.email.clone()
    }

    /// Returns a fresh contact form in the `Idle` state.
    pub fn contact_form(&self) -> ContactForm {
        ContactFormServiceImpl::new(
            self.email(),
            self.config.contact_form_service_config.clone(),
        )
    }
}

/// The service configurations derived from the loaded [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    pub contact_form_service_config: ContactFormServiceConfig,
    pub emailjs_service_config: EmailJsServiceConfig,
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let credentials = config.email.credentials();
        if credentials.is_none() {
            warn!("Email delivery is not configured, contact form submissions will fail");
        }

        Ok(Self {
            contact_form_service_config: ContactFormServiceConfig {
                credentials,
                success_dismiss: config.contact.success_dismiss.into(),
            },
            emailjs_service_config: EmailJsServiceConfig::new(Some(config.email.endpoint.clone()))?,
        })
    }
}
