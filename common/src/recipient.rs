use std::time::Duration;

use crate::card_id::{looks_like_card_id, CardId};
use crate::delivery::PublishedCard;
use crate::draft::Draft;
use crate::error::CardError;
use crate::storage::{card_key, get_json, KvStore};
use crate::template::Template;

/// Artificial delay before the recipient page shows its result.
pub const DEFAULT_LOADING_DELAY: Duration = Duration::from_millis(1000);

/// Look up a published card by id.
pub fn resolve<S: KvStore + ?Sized>(store: &S, card_id: &str) -> Result<PublishedCard, CardError> {
    if !looks_like_card_id(card_id) {
        return Err(CardError::CardNotFound(card_id.to_string()));
    }
    let draft: Draft = get_json(store, &card_key(card_id))
        .ok_or_else(|| CardError::CardNotFound(card_id.to_string()))?;
    tracing::debug!(card_id, "card resolved");
    Ok(PublishedCard {
        card_id: CardId::from(card_id),
        draft,
    })
}

/// What the recipient page renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipientView {
    Loading,
    Ready {
        card: PublishedCard,
        template: &'static Template,
    },
    NotFound,
}

impl RecipientView {
    /// Turn a lookup into a renderable state. Unknown ids, unreadable
    /// records and cards whose template left the catalog all end up as
    /// `NotFound`.
    pub fn from_lookup(result: Result<PublishedCard, CardError>) -> Self {
        let card = match result {
            Ok(card) => card,
            Err(e) => {
                tracing::debug!(error = %e, "recipient card unavailable");
                return RecipientView::NotFound;
            }
        };
        match card.draft.template() {
            Ok(template) => RecipientView::Ready { card, template },
            Err(e) => {
                tracing::warn!(card_id = %card.card_id, error = %e, "published card references unknown template");
                RecipientView::NotFound
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RecipientView::Loading)
    }
}
