use dashmap::DashMap;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::*;

pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&mut self, key: &str, value: &str);
    fn clear(&mut self);
}

#[cfg(test)]
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStorage {
    items: HashMap<String, String>,
}

#[cfg(test)]
impl MemorySessionStorage {
    pub fn new() -> MemorySessionStorage {
        MemorySessionStorage::default()
    }
}

#[cfg(test)]
impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_string(), value.to_string());
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

pub type SessionId = String;
type SessionItems = HashMap<String, String>;

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, SessionItems>,
}

impl SessionStore {
    pub fn new() -> SessionStore {
        SessionStore::default()
    }

    pub fn load(file_path: &Path) -> Result<SessionStore> {
        let store = SessionStore::new();
        for (session_id, items) in read_sessions_file(file_path)? {
            store.sessions.insert(session_id, items);
        }
        Ok(store)
    }

    // Other sessions in the file may belong to other runs, so only this
    // session's entry is replaced.
    pub fn save_session(&self, file_path: &Path, session_id: &str) -> Result<()> {
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut sessions = read_sessions_file(file_path)?;
        match self.sessions.get(session_id) {
            Some(items) => {
                sessions.insert(session_id.to_string(), items.value().clone());
            }
            None => {
                sessions.remove(session_id);
            }
        }

        let data = serde_json::to_string(&sessions).map_err(|source| Error::Parse {
            what: "session store",
            source,
        })?;
        fs::write(file_path, data).map_err(|source| Error::Io {
            path: file_path.display().to_string(),
            source,
        })
    }

    pub fn session(&self, session_id: &str) -> SessionHandle<'_> {
        SessionHandle {
            store: self,
            session_id: session_id.to_string(),
            unsaved: false,
        }
    }

    pub fn end_session(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }
}

fn read_sessions_file(file_path: &Path) -> Result<HashMap<SessionId, SessionItems>> {
    if !file_path.exists() {
        return Ok(HashMap::new());
    }
    let data = fs::read_to_string(file_path).map_err(|source| Error::Io {
        path: file_path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| Error::Parse {
        what: "session store file",
        source,
    })
}

pub struct SessionHandle<'a> {
    store: &'a SessionStore,
    session_id: SessionId,
    unsaved: bool,
}

impl SessionHandle<'_> {
    pub fn take_unsaved(&mut self) -> bool {
        std::mem::take(&mut self.unsaved)
    }
}

impl SessionStorage for SessionHandle<'_> {
    fn get_item(&self, key: &str) -> Option<String> {
        self.store
            .sessions
            .get(&self.session_id)
            .and_then(|items| items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.store
            .sessions
            .entry(self.session_id.clone())
            .or_default()
            .insert(key.to_string(), value.to_string());
        self.unsaved = true;
    }

    fn clear(&mut self) {
        if self.store.end_session(&self.session_id) {
            self.unsaved = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_overwrites() {
        let mut storage = MemorySessionStorage::new();
        assert_eq!(storage.get_item("form_lang"), None);
        storage.set_item("form_lang", "en");
        storage.set_item("form_lang", "fr");
        assert_eq!(storage.get_item("form_lang"), Some("fr".to_string()));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let mut first = store.session("a");
        first.set_item("form_lang", "es");
        let second = store.session("b");
        assert_eq!(second.get_item("form_lang"), None);
        assert_eq!(store.session("a").get_item("form_lang"), Some("es".to_string()));
    }

    #[test]
    fn test_take_unsaved_resets() {
        let store = SessionStore::new();
        let mut session = store.session("a");
        assert!(!session.take_unsaved());
        session.set_item("form_lang", "es");
        assert!(session.take_unsaved());
        assert!(!session.take_unsaved());
    }

    #[test]
    fn test_end_session_drops_items() {
        let store = SessionStore::new();
        let mut session = store.session("a");
        session.set_item("form_lang", "es");
        session.take_unsaved();
        session.clear();
        assert!(session.take_unsaved());
        assert_eq!(session.get_item("form_lang"), None);
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("sessions.json");

        let store = SessionStore::new();
        store.session("tab-1").set_item("form_lang", "en");
        store.save_session(&path, "tab-1").unwrap();

        let loaded = SessionStore::load(&path).unwrap();
        assert_eq!(loaded.session("tab-1").get_item("form_lang"), Some("en".to_string()));
    }

    #[test]
    fn test_save_keeps_sessions_of_other_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let first_run = SessionStore::load(&path).unwrap();
        let second_run = SessionStore::load(&path).unwrap();
        first_run.session("tab-1").set_item("form_lang", "es");
        first_run.save_session(&path, "tab-1").unwrap();
        second_run.session("tab-2").set_item("form_lang", "fr");
        second_run.save_session(&path, "tab-2").unwrap();

        let loaded = SessionStore::load(&path).unwrap();
        assert_eq!(loaded.session("tab-1").get_item("form_lang"), Some("es".to_string()));
        assert_eq!(loaded.session("tab-2").get_item("form_lang"), Some("fr".to_string()));
    }

    #[test]
    fn test_save_after_end_removes_only_that_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        let store = SessionStore::new();
        store.session("tab-1").set_item("form_lang", "es");
        store.session("tab-2").set_item("form_lang", "fr");
        store.save_session(&path, "tab-1").unwrap();
        store.save_session(&path, "tab-2").unwrap();

        let other_run = SessionStore::load(&path).unwrap();
        other_run.session("tab-1").clear();
        other_run.save_session(&path, "tab-1").unwrap();

        let loaded = SessionStore::load(&path).unwrap();
        assert_eq!(loaded.session("tab-1").get_item("form_lang"), None);
        assert_eq!(loaded.session("tab-2").get_item("form_lang"), Some("fr".to_string()));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::load(&dir.path().join("missing.json")).unwrap();
        assert_eq!(store.session("tab-1").get_item("form_lang"), None);
    }

    #[test]
    fn test_load_broken_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(SessionStore::load(&path), Err(Error::Parse { .. })));
    }
}
