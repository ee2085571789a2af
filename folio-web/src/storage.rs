//! `localStorage` / `sessionStorage` behind the analytics store trait

use folio_core::analytics::KeyValueStore;
use folio_core::{FolioError, Result};
use wasm_bindgen::JsValue;
use web_sys::Storage;

use crate::web::window;

/// One of the browser's Web Storage areas
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    /// Persistent storage shared by every visit from this browser
    pub fn local() -> Result<Self> {
        let storage = window()
            .and_then(|window| window.local_storage())
            .map_err(unavailable)?;
        Self::from_option(storage, "localStorage")
    }

    /// Storage scoped to the current tab session
    pub fn session() -> Result<Self> {
        let storage = window()
            .and_then(|window| window.session_storage())
            .map_err(unavailable)?;
        Self::from_option(storage, "sessionStorage")
    }

    fn from_option(storage: Option<Storage>, name: &str) -> Result<Self> {
        storage
            .map(|storage| Self { storage })
            .ok_or_else(|| FolioError::StorageUnavailable {
                message: format!("{} is disabled", name),
            })
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage.get_item(key).map_err(unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|err| FolioError::StorageWrite {
                key: key.to_string(),
                message: describe(&err),
            })
    }
}

fn unavailable(err: JsValue) -> FolioError {
    FolioError::StorageUnavailable {
        message: describe(&err),
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
