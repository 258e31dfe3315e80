use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::session_model::{RebateUser, Session};
use super::session_traits::SessionStore;
use crate::constants::SESSION_STORAGE_KEY;
use crate::errors::{Error, Result};

const CURRENT_VERSION: u32 = 1;

/// Key/value file holding the session, one JSON text value per key.
#[derive(Serialize, Deserialize, Default)]
struct StoredEntries {
    version: u32,
    entries: BTreeMap<String, String>,
}

/// Keeps the signed-in user in a JSON file on disk.
///
/// The user payload is stored verbatim as JSON text under the `"user"` key.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_entries<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&mut BTreeMap<String, String>) -> (T, bool),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Session("Session store lock poisoned".into()))?;
        let (mut entries, unreadable) = self.read_entries_locked()?;
        let (out, changed) = op(&mut entries);
        if changed || unreadable {
            self.persist_entries_locked(entries)?;
        }
        Ok(out)
    }

    /// Returns the stored entries and whether the file was unreadable.
    /// An unreadable file counts as empty and is rewritten by the caller.
    fn read_entries_locked(&self) -> Result<(BTreeMap<String, String>, bool)> {
        if !self.path.exists() {
            return Ok((BTreeMap::new(), false));
        }
        let raw = fs::read(&self.path)?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok((BTreeMap::new(), false));
        }
        match serde_json::from_slice::<StoredEntries>(&raw) {
            Ok(stored) => Ok((stored.entries, false)),
            Err(err) => {
                warn!(
                    "[Session] {} is not a session file ({}); starting signed out",
                    self.path.display(),
                    err
                );
                Ok((BTreeMap::new(), true))
            }
        }
    }

    fn persist_entries_locked(&self, entries: BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let stored = StoredEntries {
            version: CURRENT_VERSION,
            entries,
        };
        fs::write(&self.path, serde_json::to_string_pretty(&stored)?)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Session> {
        self.with_entries(|entries| {
            let Some(raw) = entries.get(SESSION_STORAGE_KEY) else {
                return (Session::Anonymous, false);
            };
            match serde_json::from_str::<RebateUser>(raw) {
                Ok(user) => {
                    debug!("[Session] Restored session for user {}", user.id);
                    (Session::Authenticated(user), false)
                }
                Err(err) => {
                    warn!("[Session] Discarding unreadable stored user: {}", err);
                    entries.remove(SESSION_STORAGE_KEY);
                    (Session::Anonymous, true)
                }
            }
        })
    }

    fn save(&self, user: &RebateUser) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.with_entries(|entries| {
            entries.insert(SESSION_STORAGE_KEY.to_string(), raw);
            ((), true)
        })
    }

    fn clear(&self) -> Result<()> {
        self.with_entries(|entries| {
            let removed = entries.remove(SESSION_STORAGE_KEY).is_some();
            ((), removed)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn user() -> RebateUser {
        RebateUser {
            id: 9,
            name: Some("Desk".into()),
            email: "desk@example.com".into(),
            created_at: "2024-02-02T00:00:00Z".into(),
        }
    }

    #[test]
    fn test_missing_file_is_anonymous() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), Session::Anonymous);
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));

        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Session::Authenticated(user()));

        // Another handle on the same file sees the same session.
        let reopened = FileSessionStore::new(store.path().to_path_buf());
        assert_eq!(reopened.load().unwrap(), Session::Authenticated(user()));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::Anonymous);
    }

    #[test]
    fn test_user_is_stored_as_json_text_under_user_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);
        store.save(&user()).unwrap();

        let file: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let text = file["entries"]["user"].as_str().unwrap();
        let parsed: RebateUser = serde_json::from_str(text).unwrap();
        assert_eq!(parsed, user());
    }

    #[test]
    fn test_unreadable_user_is_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(
            &path,
            r#"{ "version": 1, "entries": { "user": "{not json", "theme": "dark" } }"#,
        )
        .unwrap();
        let store = FileSessionStore::new(&path);

        assert_eq!(store.load().unwrap(), Session::Anonymous);
        let file: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(file["entries"].get("user").is_none());
        assert_eq!(file["entries"]["theme"], "dark");
    }

    #[test]
    fn test_foreign_file_is_anonymous_and_rewritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"id":1,"email":"a@b.c","created_at":"x"}"#).unwrap();
        let store = FileSessionStore::new(&path);

        assert_eq!(store.load().unwrap(), Session::Anonymous);
        let file: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(file["version"], CURRENT_VERSION);
        assert!(file["entries"].as_object().unwrap().is_empty());

        store.save(&user()).unwrap();
        assert_eq!(store.load().unwrap(), Session::Authenticated(user()));
    }

    #[test]
    fn test_truncated_file_does_not_block_clear() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{ "version": 1, "entries": { "us"#).unwrap();
        let store = FileSessionStore::new(&path);

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), Session::Anonymous);
    }
}
