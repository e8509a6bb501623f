//! Session entries kept in a JSON file under the user's config directory.

use std::{
    collections::BTreeMap,
    fs, io,
    path::PathBuf,
    sync::Mutex,
};

use shared::session::{SessionStorage, StorageError};
use tracing::warn;

/// [`SessionStorage`] backed by a single JSON object on disk.
///
/// Every batch rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves half a session behind.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

type Entries = BTreeMap<String, String>;

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Entries {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Entries::new(),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read session file");
                return Entries::new();
            }
        };
        serde_json::from_str(&contents).unwrap_or_else(|err| {
            warn!(path = %self.path.display(), error = %err, "ignoring unreadable session file");
            Entries::new()
        })
    }

    fn write(&self, entries: &Entries) -> Result<(), StorageError> {
        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let temp = self.path.with_extension("json.tmp");
        fs::write(&temp, serde_json::to_vec_pretty(entries)?)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn modify(&self, change: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| StorageError::Unavailable("session file lock poisoned".into()))?;
        let mut entries = self.read();
        change(&mut entries);
        self.write(&entries)
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set_all(&self, entries: &[(&str, String)]) -> Result<(), StorageError> {
        self.modify(|stored| {
            for (key, value) in entries {
                stored.insert((*key).to_string(), value.clone());
            }
        })
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        self.modify(|stored| {
            for key in keys {
                stored.remove(*key);
            }
        })
    }
}
