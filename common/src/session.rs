//! One user's pass through the card flow.
//!
//! [`CardSession`] owns the store and the id minter for as long as the app
//! runs; every screen goes through it instead of touching storage keys
//! directly. Drafts are handed to the send step explicitly.

use std::future::Future;

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::card_id::CardIdMinter;
use crate::checkout::OrderSummary;
use crate::config::AppConfig;
use crate::delivery::{self, Confirmation, ContactMethod, DeliveryRecord, SendRequest};
use crate::draft::{self, Draft, DraftForm};
use crate::error::{CardError, NotificationError};
use crate::flip::FlipCard;
use crate::notification::{notify_with_deadline, EmailNotification, NotificationStatus, Notifier};
use crate::recipient::{self, RecipientView};
use crate::storage::KvStore;
use crate::template::{self, Template, TemplateId};

/// Everything the preview screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardPreview {
    pub template: &'static Template,
    pub draft: Draft,
}

/// Result of a send: the committed record plus how the notification went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub record: DeliveryRecord,
    pub notification: NotificationStatus,
}

pub struct CardSession<S: KvStore> {
    store: S,
    config: AppConfig,
    minter: CardIdMinter,
}

impl<S: KvStore> CardSession<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        tracing::debug!(origin = %config.origin, "card session started");
        Self {
            store,
            config,
            minter: CardIdMinter::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// End the session and give the store back.
    pub fn finish(self) -> S {
        tracing::debug!("card session finished");
        self.store
    }

    /// A flip controller using the configured delay.
    pub fn flip_card(&self) -> FlipCard {
        FlipCard::new(self.config.flip_delay())
    }

    /// Template and pre-filled fields for the customization screen.
    pub fn customization(
        &self,
        template_id: TemplateId,
    ) -> Result<(&'static Template, DraftForm), CardError> {
        let template = template::lookup(template_id)?;
        let form = draft::load_draft_for(&self.store, template_id)
            .map(|d| DraftForm::from_draft(&d))
            .unwrap_or_default();
        Ok((template, form))
    }

    /// Submit the customization screen, replacing any previous draft.
    pub fn save_customization(
        &mut self,
        template_id: TemplateId,
        form: DraftForm,
    ) -> Result<Draft, CardError> {
        template::lookup(template_id)?;
        let draft = form.into_draft(template_id);
        draft::save_draft(&mut self.store, &draft)?;
        Ok(draft)
    }

    pub fn current_draft(&self) -> Option<Draft> {
        draft::load_draft(&self.store)
    }

    /// Data for `/preview/{template_id}`.
    ///
    /// The route id must name a catalog template; the card itself is rendered
    /// with the template stored in the draft.
    pub fn preview(&self, template_id: TemplateId) -> Result<CardPreview, CardError> {
        template::lookup(template_id)?;
        let draft = self.current_draft().ok_or(CardError::DraftMissing)?;
        if draft.template_id != template_id {
            tracing::debug!(
                route = template_id,
                draft = draft.template_id,
                "preview route and draft disagree on template, using the draft's"
            );
        }
        let template = draft.template()?;
        Ok(CardPreview { template, draft })
    }

    /// Data for the send screen. Fails with `DraftMissing` before anything
    /// has been customized, so the payment form is never shown without a card.
    pub fn order_summary(&self) -> Result<OrderSummary, CardError> {
        let draft = self.current_draft().ok_or(CardError::DraftMissing)?;
        let template = draft.template()?;
        Ok(OrderSummary::new(template, draft))
    }

    /// Publish `draft` at time `now` and record the delivery. No notification
    /// is attempted.
    pub fn send_at<R: Rng + ?Sized>(
        &mut self,
        draft: Option<&Draft>,
        request: &SendRequest,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<DeliveryRecord, CardError> {
        delivery::publish(&mut self.store, &mut self.minter, rng, now, draft, request)
    }

    /// [`Self::send_at`] using the system clock.
    #[cfg(feature = "std")]
    pub fn send<R: Rng + ?Sized>(
        &mut self,
        draft: Option<&Draft>,
        request: &SendRequest,
        rng: &mut R,
    ) -> Result<DeliveryRecord, CardError> {
        self.send_at(draft, request, Utc::now(), rng)
    }

    /// Notify the recipient of an already published card. See
    /// [`notify_delivery`].
    pub async fn notify<N, D>(
        &self,
        record: &DeliveryRecord,
        notifier: &N,
        deadline: D,
    ) -> NotificationStatus
    where
        N: Notifier + ?Sized,
        D: Future<Output = ()>,
    {
        notify_delivery(&self.config, record, notifier, deadline).await
    }

    /// Publish, then notify. A notification failure is reported in the
    /// outcome; the card stays published either way.
    pub async fn send_and_notify<R, N, D>(
        &mut self,
        draft: Option<&Draft>,
        request: &SendRequest,
        now: DateTime<Utc>,
        rng: &mut R,
        notifier: &N,
        deadline: D,
    ) -> Result<SendOutcome, CardError>
    where
        R: Rng + ?Sized,
        N: Notifier + ?Sized,
        D: Future<Output = ()>,
    {
        let record = self.send_at(draft, request, now, rng)?;
        let notification = self.notify(&record, notifier, deadline).await;
        Ok(SendOutcome {
            record,
            notification,
        })
    }

    /// Data for `/confirm`, or `None` if nothing has been sent yet.
    pub fn confirmation(&self) -> Option<Confirmation> {
        delivery::load_delivery(&self.store).map(|r| Confirmation::new(r, &self.config.origin))
    }

    /// Resolve `/card/{card_id}` into a renderable state.
    pub fn open_card(&self, card_id: &str) -> RecipientView {
        RecipientView::from_lookup(recipient::resolve(&self.store, card_id))
    }
}

/// Notify the recipient of a published card.
///
/// Only email deliveries with an address are notified. `deadline` is a timer
/// future that completes after [`AppConfig::notification_timeout`].
pub async fn notify_delivery<N, D>(
    config: &AppConfig,
    record: &DeliveryRecord,
    notifier: &N,
    deadline: D,
) -> NotificationStatus
where
    N: Notifier + ?Sized,
    D: Future<Output = ()>,
{
    if record.contact_method != ContactMethod::Email || record.recipient_email.is_empty() {
        return NotificationStatus::NotRequested;
    }
    let template = match record.draft_snapshot.template() {
        Ok(t) => t,
        Err(e) => return NotificationStatus::Failed(NotificationError::Rejected(e.to_string())),
    };
    let email = EmailNotification::new(
        &record.recipient_email,
        &record.draft_snapshot,
        template,
        &config.origin,
        &record.card_id,
    );
    match notify_with_deadline(notifier, &email, config.notification_timeout(), deadline).await {
        Ok(()) => NotificationStatus::Sent,
        Err(e) => NotificationStatus::Failed(e),
    }
}
