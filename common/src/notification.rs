//! Outbound "you've got a card" notification.
//!
//! The actual sender lives outside this crate (EmailJS in the browser build).
//! This module builds the message parameters and runs a send attempt against
//! a deadline.

use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use serde::{Deserialize, Serialize};

use crate::card_id::CardId;
use crate::draft::Draft;
use crate::error::NotificationError;
use crate::template::Template;

/// Public URL at which the recipient opens a card.
pub fn card_url(origin: &str, card_id: &CardId) -> String {
    format!("{}/card/{}", origin.trim_end_matches('/'), card_id)
}

/// Template parameters of the birthday email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotification {
    pub to_email: String,
    pub to_name: String,
    pub from_name: String,
    pub message: String,
    pub card_emoji: String,
    pub card_url: String,
    pub subject: String,
}

impl EmailNotification {
    pub fn new(
        to_email: &str,
        draft: &Draft,
        template: &Template,
        origin: &str,
        card_id: &CardId,
    ) -> Self {
        Self {
            to_email: to_email.to_string(),
            to_name: draft.recipient_name.clone(),
            from_name: draft.sender_name.clone(),
            message: draft.message.clone(),
            card_emoji: template.emoji.to_string(),
            card_url: card_url(origin, card_id),
            subject: format!("Happy Birthday {}! 🎉", draft.recipient_name),
        }
    }
}

/// External email sender.
#[allow(async_fn_in_trait)]
pub trait Notifier {
    async fn send_email(&self, email: &EmailNotification) -> Result<(), NotificationError>;

    /// Human-readable name of the backend (e.g. "emailjs", "log-only").
    fn notifier_name(&self) -> &str;
}

/// Outcome of the notification step of a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    /// Phone delivery: nothing is sent, the sender shares the link.
    NotRequested,
    Sent,
    /// The card is still published; the UI shows a warning.
    Failed(NotificationError),
}

impl NotificationStatus {
    pub fn warning(&self) -> Option<String> {
        match self {
            NotificationStatus::Failed(e) => Some(format!(
                "Your card was created, but the email could not be sent ({e}). Share the link below instead."
            )),
            _ => None,
        }
    }
}

/// Run one send attempt, giving up when `deadline` completes first.
///
/// `deadline` is a timer future from the host environment (e.g. a
/// `gloo_timers` timeout in the browser, `tokio::time::sleep` natively).
/// There is no retry.
pub async fn notify_with_deadline<N, D>(
    notifier: &N,
    email: &EmailNotification,
    timeout: Duration,
    deadline: D,
) -> Result<(), NotificationError>
where
    N: Notifier + ?Sized,
    D: Future<Output = ()>,
{
    let send = notifier.send_email(email);
    futures::pin_mut!(send);
    futures::pin_mut!(deadline);
    match future::select(send, deadline).await {
        Either::Left((result, _)) => {
            match &result {
                Ok(()) => tracing::info!(
                    notifier = notifier.notifier_name(),
                    to = %email.to_email,
                    "card notification sent"
                ),
                Err(e) => tracing::warn!(
                    notifier = notifier.notifier_name(),
                    error = %e,
                    "card notification failed"
                ),
            }
            result
        }
        Either::Right(((), _)) => {
            let millis = timeout.as_millis() as u64;
            tracing::warn!(
                notifier = notifier.notifier_name(),
                timeout_ms = millis,
                "card notification timed out"
            );
            Err(NotificationError::TimedOut(millis))
        }
    }
}

/// Notifier that only logs. Used when no email service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlyNotifier;

impl Notifier for LogOnlyNotifier {
    async fn send_email(&self, email: &EmailNotification) -> Result<(), NotificationError> {
        tracing::info!(to = %email.to_email, url = %email.card_url, "email delivery not configured, logging only");
        Ok(())
    }

    fn notifier_name(&self) -> &str {
        "log-only"
    }
}
