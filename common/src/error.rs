use thiserror::Error;

use crate::template::TemplateId;

/// Failures of the client-side key-value store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store could not be reached at all (e.g. storage disabled in the browser).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// The store refused the write because it is out of space.
    #[error("storage quota exceeded while writing `{key}`")]
    QuotaExceeded { key: String },
    /// A record could not be encoded before writing.
    #[error("failed to encode `{key}`: {reason}")]
    Encode { key: String, reason: String },
}

/// The outbound notification did not go through.
///
/// Never fatal: the card is already published when this is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("notification timed out after {0} ms")]
    TimedOut(u64),
    #[error("notification rejected: {0}")]
    Rejected(String),
    #[error("notification service unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced by the card lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardError {
    #[error("card template {0} not found")]
    TemplateNotFound(TemplateId),
    #[error("card {0} not found")]
    CardNotFound(String),
    #[error("no card draft has been saved yet")]
    DraftMissing,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Notification(#[from] NotificationError),
}

impl CardError {
    /// True for both flavours of "not found" (template or card id).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TemplateNotFound(_) | Self::CardNotFound(_))
    }
}

/// A configuration value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
    #[error("malformed config document: {0}")]
    Malformed(String),
}
