//! Messaging-gateway HTTP client.
//!
//! Wraps the Whaticket-style `messages/send` endpoint (text and media share
//! one URL) plus plain document retrieval, normalizing failure responses into
//! [`GatewayError`]. Sequencing, pauses and idempotency live one layer up in
//! the dispatcher.

use std::time::Duration;

use reqwest::multipart;
use serde_json::json;
use thiserror::Error;

use courier_common::config::AppConfig;

/// MIME type of billet documents attached as media.
const DOCUMENT_CONTENT_TYPE: &str = "application/pdf";

/// Errors surfaced by gateway calls. Every variant is a hard failure that
/// aborts the enclosing message flow.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Missing gateway token")]
    MissingToken,

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gateway returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Document fetch returned status {status}: {body}")]
    Document { status: u16, body: String },
}

/// Result of a single send attempt.
///
/// `Skipped` means no network call was made (empty destination). It is a
/// no-op, not a failure, and must not abort the enclosing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Gateway accepted the message; carries its parsed response envelope.
    Sent(serde_json::Value),
    /// Destination was empty; nothing was sent.
    Skipped,
}

/// HTTP client for the messaging gateway and the billet document source.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GatewayClient {
    /// Create a client with an explicit endpoint, credential and per-request
    /// timeout. The timeout applies uniformly to every outbound call.
    pub fn new(
        api_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            token,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, GatewayError> {
        Self::new(
            config.gateway_api_url.clone(),
            config.gateway_token.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Send a text message to `number`.
    pub async fn send_text(&self, number: &str, body: &str) -> Result<SendOutcome, GatewayError> {
        if number.is_empty() {
            tracing::warn!("Text send skipped — destination number is empty");
            return Ok(SendOutcome::Skipped);
        }
        let token = self.token.as_deref().ok_or(GatewayError::MissingToken)?;

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&json!({ "number": number, "body": body }))
            .send()
            .await?;

        Self::parse_send_response(response).await
    }

    /// Send `bytes` as a media attachment named `filename`.
    pub async fn send_media(
        &self,
        number: &str,
        bytes: Vec<u8>,
        filename: &str,
    ) -> Result<SendOutcome, GatewayError> {
        if number.is_empty() {
            tracing::warn!("Media send skipped — destination number is empty");
            return Ok(SendOutcome::Skipped);
        }
        let token = self.token.as_deref().ok_or(GatewayError::MissingToken)?;

        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(DOCUMENT_CONTENT_TYPE)?;
        let form = multipart::Form::new()
            .text("number", number.to_string())
            .part("medias", part);

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;

        Self::parse_send_response(response).await
    }

    /// Fetch the billet document bytes from `url`. Plain GET, no credential.
    pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>, GatewayError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Document {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn parse_send_response(response: reqwest::Response) -> Result<SendOutcome, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        // Gateway responses carry message metadata we pass through untouched
        let envelope = response.json::<serde_json::Value>().await?;
        Ok(SendOutcome::Sent(envelope))
    }
}
