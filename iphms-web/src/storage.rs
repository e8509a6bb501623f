//! Session entries kept in the browser's local storage.

use gloo_storage::{LocalStorage, Storage};
use shared::session::{SessionStorage, StorageError};
use tracing::warn;

/// Local storage backend. Values are stored as raw strings under the session
/// keys so other tabs and the browser's devtools see plain tokens.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserStorage;

fn unavailable(err: &wasm_bindgen::JsValue) -> StorageError {
    StorageError::Unavailable(format!("{err:?}"))
}

impl SessionStorage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let storage = LocalStorage::raw();
        let previous: Vec<(&str, Option<String>)> = entries
            .iter()
            .map(|(key, _)| (*key, storage.get_item(key).ok().flatten()))
            .collect();

        for (key, value) in entries {
            if let Err(err) = storage.set_item(key, value) {
                // Quota errors leave earlier keys written; put them back.
                for (key, old) in &previous {
                    let restored = match old {
                        Some(old) => storage.set_item(key, old),
                        None => storage.remove_item(key),
                    };
                    if let Err(rollback) = restored {
                        warn!(key, error = ?rollback, "failed to restore session entry");
                    }
                }
                return Err(unavailable(&err));
            }
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let storage = LocalStorage::raw();
        for key in keys {
            storage.remove_item(key).map_err(|err| unavailable(&err))?;
        }
        Ok(())
    }
}
