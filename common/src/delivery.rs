use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::card_id::{CardId, CardIdMinter};
use crate::draft::Draft;
use crate::error::CardError;
use crate::notification::card_url;
use crate::storage::{card_key, get_json, put_json, KvStore, DELIVERY_KEY};

/// How the recipient hears about the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    #[default]
    Email,
    Phone,
}

impl ContactMethod {
    /// Channel name as shown on the confirmation screen.
    pub fn label(self) -> &'static str {
        match self {
            ContactMethod::Email => "email",
            ContactMethod::Phone => "SMS",
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactMethod::Email => write!(f, "email"),
            ContactMethod::Phone => write!(f, "phone"),
        }
    }
}

/// Recipient contact details entered on the send screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendRequest {
    pub contact_method: ContactMethod,
    pub recipient_email: String,
    pub recipient_phone: String,
}

impl SendRequest {
    pub fn email(address: &str) -> Self {
        Self {
            contact_method: ContactMethod::Email,
            recipient_email: address.to_string(),
            recipient_phone: String::new(),
        }
    }

    pub fn phone(number: &str) -> Self {
        Self {
            contact_method: ContactMethod::Phone,
            recipient_email: String::new(),
            recipient_phone: number.to_string(),
        }
    }
}

/// What the confirmation screen shows for the last send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecord {
    #[serde(default)]
    pub recipient_email: String,
    #[serde(default)]
    pub recipient_phone: String,
    pub contact_method: ContactMethod,
    #[serde(rename = "cardData")]
    pub draft_snapshot: Draft,
    #[serde(rename = "uniqueCardId")]
    pub card_id: CardId,
}

impl DeliveryRecord {
    /// Email address or phone number, depending on the contact method.
    pub fn delivery_address(&self) -> &str {
        match self.contact_method {
            ContactMethod::Email => &self.recipient_email,
            ContactMethod::Phone => &self.recipient_phone,
        }
    }

    pub fn card_url(&self, origin: &str) -> String {
        card_url(origin, &self.card_id)
    }
}

/// A sent card as the recipient link resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedCard {
    pub card_id: CardId,
    pub draft: Draft,
}

/// Publish `draft` and record the delivery.
///
/// Writes the published card first and the delivery record second; neither
/// is undone if a later step (including notification) fails.
pub fn publish<S, R>(
    store: &mut S,
    minter: &mut CardIdMinter,
    rng: &mut R,
    now: DateTime<Utc>,
    draft: Option<&Draft>,
    request: &SendRequest,
) -> Result<DeliveryRecord, CardError>
where
    S: KvStore + ?Sized,
    R: Rng + ?Sized,
{
    let draft = draft.ok_or(CardError::DraftMissing)?;
    draft.template()?;

    let card_id = loop {
        let candidate = minter.mint(now, rng);
        if !store.contains_key(&card_key(candidate.as_str()))? {
            break candidate;
        }
        tracing::warn!(card_id = %candidate, "minted card id already taken, re-minting");
    };

    put_json(store, &card_key(card_id.as_str()), draft)?;

    let record = DeliveryRecord {
        recipient_email: request.recipient_email.clone(),
        recipient_phone: request.recipient_phone.clone(),
        contact_method: request.contact_method,
        draft_snapshot: draft.clone(),
        card_id: card_id.clone(),
    };
    put_json(store, DELIVERY_KEY, &record)?;

    tracing::info!(
        %card_id,
        template_id = draft.template_id,
        contact_method = %request.contact_method,
        "card published"
    );
    Ok(record)
}

/// The last delivery record, if any.
pub fn load_delivery<S: KvStore + ?Sized>(store: &S) -> Option<DeliveryRecord> {
    get_json(store, DELIVERY_KEY)
}

/// Display data for the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub record: DeliveryRecord,
    pub delivery_method: &'static str,
    pub delivery_address: String,
    pub card_url: String,
}

impl Confirmation {
    pub fn new(record: DeliveryRecord, origin: &str) -> Self {
        Self {
            delivery_method: record.contact_method.label(),
            delivery_address: record.delivery_address().to_string(),
            card_url: record.card_url(origin),
            record,
        }
    }
}
