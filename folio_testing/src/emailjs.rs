//! A stand-in for the EmailJS REST API.
//!
//! Accepts the same JSON body as `POST /api/v1.0/email/send`, answers `OK`
//! when the service id, template id and public key match the configured ones
//! and records every accepted email in an outbox.

use std::{collections::BTreeMap, net::IpAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use serde::Deserialize;
use tokio::{net::TcpListener, sync::Mutex};
use tracing::{info, warn};

pub const SEND_ROUTE: &str = "/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct FakeEmailJs {
    account: Arc<Account>,
    outbox: Arc<Mutex<Vec<ReceivedEmail>>>,
}

#[derive(Debug)]
struct Account {
    service_id: String,
    template_id: String,
    public_key: String,
}

/// An email accepted by [`FakeEmailJs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedEmail {
    pub service_id: String,
    pub template_id: String,
    pub template_params: BTreeMap<String, String>,
}

impl FakeEmailJs {
    pub fn new(
        service_id: impl Into<String>,
        template_id: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            account: Account {
                service_id: service_id.into(),
                template_id: template_id.into(),
                public_key: public_key.into(),
            }
            .into(),
            outbox: Default::default(),
        }
    }

    pub fn router(&self) -> Router<()> {
        Router::new()
            .route(SEND_ROUTE, routing::post(send))
            .with_state(self.clone())
    }

    /// Returns all emails accepted so far, oldest first.
    pub async fn outbox(&self) -> Vec<ReceivedEmail> {
        self.outbox.lock().await.clone()
    }

    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        axum::serve(listener, self.router())
            .await
            .context("Failed to start HTTP server")
    }
}

pub async fn start_server(host: IpAddr, port: u16, fake: FakeEmailJs) -> anyhow::Result<()> {
    info!("Starting emailjs testing server on {host}:{port}");
    info!("Send endpoint: http://{host}:{port}{SEND_ROUTE}");
    info!(
        "Service id: {:?}, template id: {:?}, public key: {:?}",
        fake.account.service_id, fake.account.template_id, fake.account.public_key
    );

    let listener = TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {host}:{port}"))?;
    fake.serve(listener).await
}

#[derive(Deserialize)]
struct SendRequest {
    service_id: String,
    template_id: String,
    user_id: String,
    #[serde(default)]
    template_params: BTreeMap<String, String>,
}

async fn send(State(fake): State<FakeEmailJs>, Json(request): Json<SendRequest>) -> Response {
    let account = &*fake.account;

    let rejection = if request.user_id != account.public_key {
        Some("The Public Key is invalid")
    } else if request.service_id != account.service_id {
        Some("The service ID is invalid")
    } else if request.template_id != account.template_id {
        Some("The template ID is invalid")
    } else {
        None
    };

    if let Some(rejection) = rejection {
        warn!("Rejecting email: {rejection}");
        return (StatusCode::BAD_REQUEST, rejection).into_response();
    }

    info!("Accepted email with params {:?}", request.template_params);
    fake.outbox.lock().await.push(ReceivedEmail {
        service_id: request.service_id,
        template_id: request.template_id,
        template_params: request.template_params,
    });

    (StatusCode::OK, "OK").into_response()
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::*;

    async fn spawn(fake: FakeEmailJs) -> SocketAddr {
        let listener = TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(fake.serve(listener));
        addr
    }

    #[tokio::test]
    async fn accepts_matching_account() {
        let fake = FakeEmailJs::new("service", "template", "key");
        let addr = spawn(fake.clone()).await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}{SEND_ROUTE}"))
            .json(&serde_json::json!({
                "service_id": "service",
                "template_id": "template",
                "user_id": "key",
                "template_params": { "email": "a@b.com", "message": "Hello there!" },
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.unwrap(), "OK");

        let outbox = fake.outbox().await;
        assert_eq!(outbox.len(), 1);
        assert_eq!(outbox[0].template_params["email"], "a@b.com");
    }

    #[tokio::test]
    async fn rejects_wrong_public_key() {
        let fake = FakeEmailJs::new("service", "template", "key");
        let addr = spawn(fake.clone()).await;

        let response = reqwest::Client::new()
            .post(format!("http://{addr}{SEND_ROUTE}"))
            .json(&serde_json::json!({
                "service_id": "service",
                "template_id": "template",
                "user_id": "other",
            }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(
            response.text().await.unwrap(),
            "The Public Key is invalid"
        );
        assert!(fake.outbox().await.is_empty());
    }
}
