use std::sync::Arc;

use anyhow::{anyhow, Context};
use folio_email_contracts::EmailDeliveryService;
use folio_models::{contact::ContactSubmission, delivery::DeliveryCredentials};
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::http::HttpClient;

pub const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Delivers contact submissions through the EmailJS REST API.
#[derive(Debug, Clone)]
pub struct EmailJsServiceImpl {
    config: EmailJsServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailJsServiceConfig {
    send_endpoint: Arc<Url>,
}

impl EmailJsServiceConfig {
    pub fn new(send_endpoint: Option<Url>) -> anyhow::Result<Self> {
        let send_endpoint = match send_endpoint {
            Some(endpoint) => endpoint,
            None => SEND_ENDPOINT.parse()?,
        };

        Ok(Self {
            send_endpoint: send_endpoint.into(),
        })
    }

    pub fn send_endpoint(&self) -> &Url {
        &self.send_endpoint
    }
}

impl EmailJsServiceImpl {
    pub fn new(config: EmailJsServiceConfig) -> anyhow::Result<Self> {
        let client = HttpClient::new().context("Failed to build http client")?;
        Ok(Self { config, client })
    }
}

impl EmailDeliveryService for EmailJsServiceImpl {
    #[tracing::instrument(skip_all, fields(service_id = %credentials.service_id))]
    async fn send(
        &self,
        credentials: &DeliveryCredentials,
        submission: &ContactSubmission,
    ) -> anyhow::Result<()> {
        let request = SendRequest {
            service_id: &credentials.service_id,
            template_id: &credentials.template_id,
            user_id: &credentials.public_key,
            template_params: TemplateParams {
                email: &submission.email,
                message: &submission.message,
            },
        };

        let response = self
            .client
            .post((*self.config.send_endpoint).clone())
            .json(&request)
            .send()
            .await
            .context("Failed to reach emailjs")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read emailjs response")?;
        if !status.is_success() {
            return Err(anyhow!("emailjs responded with {status}: {body}"));
        }

        debug!("emailjs accepted message: {body}");
        Ok(())
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: TemplateParams<'a>,
}

#[derive(Serialize)]
struct TemplateParams<'a> {
    email: &'a str,
    message: &'a str,
}
