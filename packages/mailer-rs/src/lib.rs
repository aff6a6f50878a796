// Thin client for JSON transactional email APIs (Resend/Postmark style).
//
// POST {api_url} with a bearer key and {from, to, subject, text}.

pub mod models;

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::models::{OutgoingEmail, SendResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct MailerOptions {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("recipient address is empty")]
    EmptyRecipient,

    #[error("request to email provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("email provider returned {status}: {body}")]
    Rejected { status: u16, body: String },
}

#[derive(Debug, Clone)]
pub struct MailerService {
    options: MailerOptions,
    client: Client,
}

impl MailerService {
    pub fn new(options: MailerOptions) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { options, client }
    }

    pub fn from_address(&self) -> &str {
        &self.options.from_address
    }

    /// Send a plain-text email. Returns the provider's message id when it
    /// reports one.
    pub async fn send_text(
        &self,
        recipient: &str,
        subject: &str,
        text: &str,
    ) -> Result<Option<String>, MailerError> {
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(MailerError::EmptyRecipient);
        }

        let body = OutgoingEmail {
            from: &self.options.from_address,
            to: recipient,
            subject,
            text,
        };

        let response = self
            .client
            .post(&self.options.api_url)
            .bearer_auth(&self.options.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "email provider rejected message");
            return Err(MailerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        // Some providers answer 202 with an empty body.
        let ack = response.json::<SendResponse>().await.ok();
        Ok(ack.and_then(|a| a.id))
    }
}
