use std::{collections::HashMap, sync::RwLock};

use super::{SessionStorage, StorageError};

/// Session backend that lives in process memory.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".into()))?;
        for (key, value) in entries {
            guard.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Unavailable("memory storage poisoned".into()))?;
        for key in keys {
            guard.remove(*key);
        }
        Ok(())
    }
}
