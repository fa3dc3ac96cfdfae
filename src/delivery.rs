use std::path::Path;
use std::{fmt, fs};

use anyhow::Context;
use chrono::{DateTime, Utc};

use crate::configuration::EmailClientSettings;
use crate::domain::{ActiveSubscriber, Tip, TipSource};
use crate::email_client::EmailClient;
use crate::subscribers::load_active_subscribers;
use crate::utils::error_chain_fmt;

/// Tip used when neither the override nor the tip file provides content
pub const PLACEHOLDER_TIP: &str = "No tip available for today.";

/// Dispatch error type
#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("The email API authorization token is not configured")]
    MissingAuthorizationToken,
    #[error("There are no active subscribers to deliver to")]
    NoActiveSubscribers,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Delivery outcome for a single subscriber
pub enum SendOutcome {
    Delivered,
    Failed { reason: anyhow::Error },
}

/// Tally of a dispatch run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub sent: u32,
    pub failed: u32,
}

impl DeliveryReport {
    /// Tally one subscriber's outcome, logging failures
    fn record(&mut self, outcome: SendOutcome) {
        match outcome {
            SendOutcome::Delivered => self.sent += 1,
            SendOutcome::Failed { reason } => {
                self.failed += 1;
                tracing::warn!(
                    error.cause_chain = ?reason,
                    error.message = %reason,
                    "Failed to deliver the issue to a subscriber"
                );
            }
        }
    }
}

/// Resolve the tip for today's issue: a non-empty override wins over the tip
/// file, and an unreadable file falls back to the placeholder
#[tracing::instrument(name = "Load the daily tip", skip_all)]
pub fn load_tip(
    content_override: Option<String>,
    source_tag: Option<String>,
    tip_path: &Path,
) -> Tip {
    let source = source_tag.as_deref().map(TipSource::parse).unwrap_or_default();

    let content = content_override
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| match fs::read_to_string(tip_path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(
                    error.message = %e,
                    "No tip file at {}, using the placeholder", tip_path.display()
                );
                PLACEHOLDER_TIP.to_owned()
            }
        });

    Tip { content, source }
}

/// Send today's issue to every active subscriber, isolating per-subscriber
/// failures, and report the tally
#[tracing::instrument(
    name = "Send the newsletter issue",
    skip_all,
    fields(tip_source = %tip.source)
)]
pub async fn send_newsletter(
    email: EmailClientSettings,
    subscribers_path: &Path,
    tip: &Tip,
    now: DateTime<Utc>,
) -> Result<DeliveryReport, DispatchError> {
    // Load the subscriber list before touching the email API
    let subscribers =
        load_active_subscribers(subscribers_path).context("Failed to load the subscriber list")?;
    if subscribers.is_empty() {
        return Err(DispatchError::NoActiveSubscribers);
    }

    let email_client = email
        .client()
        .ok_or(DispatchError::MissingAuthorizationToken)?;

    // Render the issue once; every subscriber receives the same content
    let subject = newsletter_subject(now);
    let html_content = render_newsletter_html(tip, now);
    let text_content = render_newsletter_text(tip, now);

    // Send the issue to each subscriber, handling errors and edge cases
    let mut report = DeliveryReport::default();
    for subscriber in subscribers {
        match subscriber {
            Ok(subscriber) => {
                let outcome = deliver_issue(
                    &email_client,
                    &subscriber,
                    &subject,
                    &html_content,
                    &text_content,
                )
                .await;
                report.record(outcome);
            }

            // A row selected for delivery whose stored email does not parse
            Err(error) => {
                report.record(SendOutcome::Failed {
                    reason: error.context("The stored contact details are invalid"),
                });
            }
        }
    }

    Ok(report)
}

/// Send the rendered issue to a single subscriber
async fn deliver_issue(
    email_client: &EmailClient,
    subscriber: &ActiveSubscriber,
    subject: &str,
    html_content: &str,
    text_content: &str,
) -> SendOutcome {
    match email_client
        .send_email(&subscriber.email, subject, html_content, text_content)
        .await
        .with_context(|| format!("Failed to send the issue to {}", subscriber.email))
    {
        Ok(()) => {
            tracing::info!("Issue sent to {}", subscriber.email);
            SendOutcome::Delivered
        }
        Err(reason) => SendOutcome::Failed { reason },
    }
}

/// Subject line for today's issue
pub fn newsletter_subject(now: DateTime<Utc>) -> String {
    format!("📚 Daily SQL Tip - {}", now.format("%B %d"))
}

/// Render the HTML issue body from the fixed template;
/// tip content is trusted and interpolated unescaped
pub fn render_newsletter_html(tip: &Tip, now: DateTime<Utc>) -> String {
    format!(
        include_str!("delivery/newsletter_email.html"),
        now.format("%B %d, %Y"),
        tip.source.badge(),
        tip.content
    )
}

/// Render the plain text alternative sent alongside the HTML body
pub fn render_newsletter_text(tip: &Tip, now: DateTime<Utc>) -> String {
    format!(
        "Your Daily SQL Tip - {}\n\n[{}]\n{}\n\nKeep learning and happy querying!\nYou're receiving this because you subscribed to SQL Daily.\n",
        now.format("%B %d, %Y"),
        tip.source.badge(),
        tip.content
    )
}
