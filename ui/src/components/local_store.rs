//! `window.localStorage` behind the [`KvStore`] interface.

use cardpost_common::storage::KvStore;
use cardpost_common::StorageError;

/// Handle on the page's local storage. Holds no data itself; every call
/// goes to the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStore;

#[cfg(target_family = "wasm")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        let window =
            web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".into()))
    }
}

#[cfg(target_family = "wasm")]
fn write_error(key: &str, err: wasm_bindgen::JsValue) -> StorageError {
    use wasm_bindgen::JsCast;

    match err.dyn_ref::<web_sys::DomException>() {
        Some(ex) if ex.name() == "QuotaExceededError" => StorageError::QuotaExceeded {
            key: key.to_string(),
        },
        _ => StorageError::Unavailable(format!("{err:?}")),
    }
}

#[cfg(target_family = "wasm")]
impl KvStore for LocalStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| write_error(key, e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

// Non-WASM stub for type checking
#[cfg(not(target_family = "wasm"))]
impl KvStore for LocalStore {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("localStorage only available in WASM".into()))
    }

    fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("localStorage only available in WASM".into()))
    }

    fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("localStorage only available in WASM".into()))
    }
}
