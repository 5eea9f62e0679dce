use serde::{Deserialize, Serialize};

use crate::error::{CardError, StorageError};
use crate::storage::{get_json, put_json, KvStore, DRAFT_KEY};
use crate::template::{self, Template, TemplateId};

/// The card being edited. There is only ever one; saving replaces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Stored as `cardId` for compatibility with existing browser data.
    #[serde(rename = "cardId")]
    pub template_id: TemplateId,
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub sender_name: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "useAI", default)]
    pub use_ai_message: bool,
}

impl Draft {
    /// The catalog template this draft targets.
    pub fn template(&self) -> Result<&'static Template, CardError> {
        template::lookup(self.template_id)
    }
}

/// Overwrite the stored draft.
pub fn save_draft<S: KvStore + ?Sized>(store: &mut S, draft: &Draft) -> Result<(), StorageError> {
    put_json(store, DRAFT_KEY, draft)?;
    tracing::info!(template_id = draft.template_id, "draft saved");
    Ok(())
}

/// The stored draft, or `None` if nothing (readable) was saved.
pub fn load_draft<S: KvStore + ?Sized>(store: &S) -> Option<Draft> {
    get_json(store, DRAFT_KEY)
}

/// The stored draft, only if it was made for `template_id`.
///
/// The customization screen uses this to pre-fill its fields when the user
/// comes back to the same template.
pub fn load_draft_for<S: KvStore + ?Sized>(store: &S, template_id: TemplateId) -> Option<Draft> {
    load_draft(store).filter(|d| d.template_id == template_id)
}

/// Field values of the customization screen.
///
/// The custom and AI messages are edited independently so toggling the AI
/// switch does not lose either text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftForm {
    pub recipient_name: String,
    pub sender_name: String,
    pub custom_message: String,
    pub ai_message: String,
    pub use_ai: bool,
}

impl DraftForm {
    /// Pre-fill from a previously saved draft. The saved message seeds both
    /// message fields since the draft only keeps the one that was used.
    pub fn from_draft(draft: &Draft) -> Self {
        Self {
            recipient_name: draft.recipient_name.clone(),
            sender_name: draft.sender_name.clone(),
            custom_message: draft.message.clone(),
            ai_message: draft.message.clone(),
            use_ai: draft.use_ai_message,
        }
    }

    /// The message that will be written on the card.
    pub fn active_message(&self) -> &str {
        if self.use_ai {
            &self.ai_message
        } else {
            &self.custom_message
        }
    }

    pub fn into_draft(self, template_id: TemplateId) -> Draft {
        let message = if self.use_ai {
            self.ai_message
        } else {
            self.custom_message
        };
        Draft {
            template_id,
            recipient_name: self.recipient_name,
            sender_name: self.sender_name,
            message,
            use_ai_message: self.use_ai,
        }
    }
}
