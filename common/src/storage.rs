//! String key-value storage, shaped after the browser's `localStorage`.
//!
//! Every record the card lifecycle persists goes through [`KvStore`]. The
//! browser build backs it with `window.localStorage`; tests and native tools
//! use [`MemoryStore`].

use std::collections::BTreeMap;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StorageError;

/// Key of the single in-progress draft.
pub const DRAFT_KEY: &str = "cardData";

/// Key of the most recent delivery record.
pub const DELIVERY_KEY: &str = "deliveryInfo";

/// Prefix of every published card key.
pub const CARD_KEY_PREFIX: &str = "card_";

/// Storage key for a published card.
pub fn card_key(card_id: &str) -> String {
    format!("{CARD_KEY_PREFIX}{card_id}")
}

/// Minimal interface over a string key-value store.
pub trait KvStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;

    fn contains_key(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_item(key)?.is_some())
    }
}

impl<S: KvStore + ?Sized> KvStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}

/// Encode `value` as JSON and write it under `key`.
pub fn put_json<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    S: KvStore + ?Sized,
    T: Serialize,
{
    let json = serde_json::to_string(value).map_err(|e| StorageError::Encode {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set_item(key, &json)
}

/// Read and decode the JSON record under `key`.
///
/// Read-path failures degrade to `None`: an unreachable store, a missing key
/// and a corrupted value all look like absence to the caller.
pub fn get_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KvStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(key, "no stored record");
            return None;
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "storage read failed, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "stored record is malformed, treating as absent");
            None
        }
    }
}

/// In-process store. Optionally enforces a byte quota to mimic a full
/// browser storage area.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys + values exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota_bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// A store whose every operation fails, like `localStorage` in a
    /// privacy-locked browser.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keys currently stored, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    fn used_bytes(&self) -> usize {
        self.items.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("memory store disabled".into()));
        }
        Ok(())
    }
}

impl KvStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;
        if let Some(quota) = self.quota_bytes {
            let replaced = self.items.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                });
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_keys_use_prefix() {
        assert_eq!(card_key("1700000000000"), "card_1700000000000");
    }

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        store.set_item("a", "1").unwrap();
        assert_eq!(store.get_item("a").unwrap().as_deref(), Some("1"));
        assert!(store.contains_key("a").unwrap());
        store.remove_item("a").unwrap();
        assert_eq!(store.get_item("a").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_write() {
        let mut store = MemoryStore::with_quota(10);
        store.set_item("k", "12345").unwrap();
        let err = store.set_item("other", "123456789").unwrap_err();
        assert_eq!(
            err,
            StorageError::QuotaExceeded {
                key: "other".into()
            }
        );
        // Overwriting an existing key only counts the difference.
        store.set_item("k", "123456789").unwrap();
    }

    #[test]
    fn malformed_json_reads_as_absent() {
        let mut store = MemoryStore::new();
        store.set_item("bad", "{not json").unwrap();
        let value: Option<Vec<u32>> = get_json(&store, "bad");
        assert!(value.is_none());
    }

    #[test]
    fn unavailable_store_reads_as_absent_and_fails_writes() {
        let mut store = MemoryStore::unavailable();
        let value: Option<String> = get_json(&store, DRAFT_KEY);
        assert!(value.is_none());
        assert!(matches!(
            put_json(&mut store, DRAFT_KEY, &"x"),
            Err(StorageError::Unavailable(_))
        ));
    }
}
