use std::time::Duration;

use cardpost_common::draft::{Draft, DraftForm};
use cardpost_common::storage::{MemoryStore, CARD_KEY_PREFIX};
use cardpost_common::template::TemplateId;

pub mod harness;

/// Deadline future for a notification attempt, driven by the tokio clock.
pub fn deadline(timeout: Duration) -> tokio::time::Sleep {
    tokio::time::sleep(timeout)
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cardpost_common=debug")),
        )
        .with_test_writer()
        .try_init()
        .ok();
}

/// Customization form as a sender would fill it in.
pub fn make_form(recipient: &str, sender: &str, message: &str) -> DraftForm {
    DraftForm {
        recipient_name: recipient.to_string(),
        sender_name: sender.to_string(),
        custom_message: message.to_string(),
        ..Default::default()
    }
}

/// A draft built without going through a session.
pub fn make_draft(template_id: TemplateId, recipient: &str, sender: &str) -> Draft {
    Draft {
        template_id,
        recipient_name: recipient.to_string(),
        sender_name: sender.to_string(),
        message: format!("Happy birthday, {recipient}!"),
        use_ai_message: false,
    }
}

/// Number of published card records in `store`.
pub fn published_count(store: &MemoryStore) -> usize {
    store.keys().filter(|k| k.starts_with(CARD_KEY_PREFIX)).count()
}
