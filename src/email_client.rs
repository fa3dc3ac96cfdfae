use std::{fmt, time};

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::domain::EmailAddress;
use crate::utils::error_chain_fmt;

/// Email client data
pub struct EmailClient {
    http_client: Client,
    base_url: Url,
    sender: EmailAddress,
    authorization_token: SecretString,
}

/// Email delivery error type
#[derive(thiserror::Error)]
pub enum EmailClientError {
    #[error("Failed to execute the request to the email API")]
    Transport(#[from] reqwest::Error),
    #[error("The email API rejected the request with status {0}")]
    Rejected(StatusCode),
}

impl fmt::Debug for EmailClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl EmailClient {
    /// Build the email client with a bounded per-request timeout
    pub fn new(
        base_url: Url,
        sender: EmailAddress,
        authorization_token: SecretString,
        timeout: time::Duration,
    ) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build the HTTP client");
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    /// Send an email using Postmark's REST API
    /// <https://postmarkapp.com/developer/user-guide/send-email-with-api>
    pub async fn send_email(
        &self,
        recipient: &EmailAddress,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), EmailClientError> {
        let url = self.base_url.join("/email").expect("Cannot parse URL");
        let body = SendEmailRequest {
            from: self.sender.as_ref(),
            to: recipient.as_ref(),
            subject,
            html_body: html_content,
            text_body: text_content,
        };

        let response = self
            .http_client
            .post(url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&body)
            .send()
            .await?;

        // The email API signals acceptance with 200, 201, or 202
        let status = response.status();
        match status.as_u16() {
            200..=202 => Ok(()),
            _ => Err(EmailClientError::Rejected(status)),
        }
    }
}

/// Send email request body data, as per Postmark's API
#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}
