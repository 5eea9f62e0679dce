use std::sync::{Arc, Mutex};
use std::time::Duration;

use cardpost_common::delivery::SendRequest;
use cardpost_common::draft::Draft;
use cardpost_common::notification::{EmailNotification, Notifier};
use cardpost_common::storage::MemoryStore;
use cardpost_common::template::TemplateId;
use cardpost_common::{AppConfig, CardError, CardSession, NotificationError, SendOutcome};

use crate::{deadline, init_tracing, make_form};

/// Notifier that keeps every email it was asked to send.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<EmailNotification>>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<EmailNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn send_email(&self, email: &EmailNotification) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }

    fn notifier_name(&self) -> &str {
        "recording"
    }
}

/// Notifier whose service always rejects the request.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectingNotifier;

impl Notifier for RejectingNotifier {
    async fn send_email(&self, _: &EmailNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Rejected("422 The recipient address is empty".into()))
    }

    fn notifier_name(&self) -> &str {
        "rejecting"
    }
}

/// Notifier that answers only after `delay`.
#[derive(Debug, Clone, Copy)]
pub struct SlowNotifier {
    pub delay: Duration,
}

impl Notifier for SlowNotifier {
    async fn send_email(&self, _: &EmailNotification) -> Result<(), NotificationError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    fn notifier_name(&self) -> &str {
        "slow"
    }
}

/// One sender going through the whole flow against an in-memory store.
pub struct Sender {
    pub name: String,
    pub session: CardSession<MemoryStore>,
}

impl Sender {
    /// Fill in and submit the customization screen for `template_id`.
    pub fn customize(&mut self, template_id: TemplateId, recipient: &str, message: &str) -> Draft {
        self.session
            .save_customization(template_id, make_form(recipient, &self.name, message))
            .expect("customization should save")
    }

    /// Send the current draft by email and wait for the notification step.
    pub async fn send_email<N: Notifier>(
        &mut self,
        address: &str,
        notifier: &N,
    ) -> Result<SendOutcome, CardError> {
        let draft = self.session.current_draft();
        let timeout = self.session.config().notification_timeout();
        tracing::debug!(
            sender = %self.name,
            to = address,
            notifier = notifier.notifier_name(),
            "sending card by email"
        );
        self.session
            .send_and_notify(
                draft.as_ref(),
                &SendRequest::email(address),
                chrono::Utc::now(),
                &mut rand::thread_rng(),
                notifier,
                deadline(timeout),
            )
            .await
    }

    /// Send the current draft to a phone number. No notification is made.
    pub async fn send_phone(&mut self, number: &str) -> Result<SendOutcome, CardError> {
        let draft = self.session.current_draft();
        self.session
            .send_and_notify(
                draft.as_ref(),
                &SendRequest::phone(number),
                chrono::Utc::now(),
                &mut rand::thread_rng(),
                &RecordingNotifier::default(),
                futures::future::pending(),
            )
            .await
    }
}

/// Test fixture: a sender with a fresh session.
pub struct TestHarness {
    pub alex: Sender,
}

impl TestHarness {
    pub fn setup() -> Self {
        Self::with_config(AppConfig {
            origin: "https://cards.test".to_string(),
            ..AppConfig::default()
        })
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(MemoryStore::new(), config)
    }

    pub fn with_store(store: MemoryStore, config: AppConfig) -> Self {
        init_tracing();
        tracing::info!(origin = %config.origin, records = store.len(), "test harness ready");
        Self {
            alex: Sender {
                name: "Alex".to_string(),
                session: CardSession::new(store, config),
            },
        }
    }

    /// A recipient opening links against the same browser storage.
    pub fn recipient_session(&self) -> CardSession<MemoryStore> {
        CardSession::new(
            self.alex.session.store().clone(),
            self.alex.session.config().clone(),
        )
    }
}
