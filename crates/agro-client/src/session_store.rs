//! Session persistence and the protected-page guard.

use std::sync::Arc;

use agro_types::{Profile, Role, Session};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{SessionError, StorageError};
use crate::storage::KeyValueStore;

pub const SESSION_KEY: &str = "usuario";
pub const PROFILE_KEY: &str = "perfil";
pub const LANGUAGE_KEY: &str = "idioma";

/// Shape of a stored session before it has been checked. Every field is
/// optional so that a partially written record is detected rather than
/// rejected by the parser with a less useful error.
#[derive(Debug, Deserialize)]
struct StoredSession {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    rol: Option<Value>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    nombre: Option<String>,
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

impl StoredSession {
    fn into_session(self) -> Option<Session> {
        let user_id = integer(self.id.as_ref()?)?;
        let role = Role::try_from(integer(self.rol.as_ref()?)?).ok()?;
        let session = Session {
            user_id,
            role,
            token: self.token?,
            display_name: self.nombre.filter(|n| !n.trim().is_empty()),
        };
        session.is_complete().then_some(session)
    }
}

/// Session and cached account state, shared by every page.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Current session, or `None` when it is absent, unreadable or incomplete.
    pub fn load(&self) -> Option<Session> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Could not read stored session: {}", e);
                return None;
            }
        };
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => {
                let session = stored.into_session();
                if session.is_none() {
                    log::debug!("Stored session is incomplete");
                }
                session
            }
            Err(e) => {
                log::debug!("Stored session is not valid JSON: {}", e);
                None
            }
        }
    }

    pub fn save(&self, session: &Session) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(session).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.set(SESSION_KEY, &encoded)
    }

    /// Removes the session and cached account data. The language preference
    /// survives a logout.
    pub fn clear(&self) {
        for key in [SESSION_KEY, PROFILE_KEY] {
            if let Err(e) = self.store.remove(key) {
                log::warn!("Could not remove '{}' from storage: {}", key, e);
            }
        }
    }

    /// Guard for pages restricted to one role. Any failure clears local state.
    pub fn require_role(&self, expected: Role) -> Result<Session, SessionError> {
        match self.load() {
            Some(session) if session.role == expected => Ok(session),
            Some(session) => {
                log::info!(
                    "Role {} may not open a page for role {}",
                    session.role,
                    expected
                );
                self.clear();
                Err(SessionError::LoginRequired)
            }
            None => {
                self.clear();
                Err(SessionError::LoginRequired)
            }
        }
    }

    /// Guard for pages open to every signed-in user.
    pub fn require_any(&self) -> Result<Session, SessionError> {
        self.load().ok_or_else(|| {
            self.clear();
            SessionError::LoginRequired
        })
    }

    /// Stores the display name shown in greetings, keeping the rest of the
    /// session untouched. Does nothing without a session.
    pub fn update_display_name(&self, name: &str) -> Result<(), StorageError> {
        match self.load() {
            Some(session) => self.save(&session.with_display_name(name)),
            None => Ok(()),
        }
    }

    pub fn cached_profile(&self) -> Option<Profile> {
        let raw = self.store.get(PROFILE_KEY).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    pub fn cache_profile(&self, profile: &Profile) -> Result<(), StorageError> {
        let encoded =
            serde_json::to_string(profile).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.store.set(PROFILE_KEY, &encoded)
    }

    /// Stored language code, if one was chosen.
    pub fn language(&self) -> Option<String> {
        match self.store.get(LANGUAGE_KEY) {
            Ok(value) => value.filter(|v| !v.trim().is_empty()),
            Err(e) => {
                log::warn!("Could not read language preference: {}", e);
                None
            }
        }
    }

    pub fn set_language(&self, code: &str) -> Result<(), StorageError> {
        self.store.set(LANGUAGE_KEY, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store_with(raw: Option<&str>) -> (Arc<MemoryStore>, SessionStore) {
        let memory = Arc::new(MemoryStore::new());
        if let Some(raw) = raw {
            memory.set(SESSION_KEY, raw).unwrap();
        }
        memory.set(PROFILE_KEY, r#"{"id":5,"nombre":"Ana","correo":"a@b.c"}"#).unwrap();
        memory.set(LANGUAGE_KEY, "en").unwrap();
        let sessions = SessionStore::new(memory.clone());
        (memory, sessions)
    }

    #[test]
    fn test_load_complete_session() {
        let (_, sessions) = store_with(Some(r#"{"id":5,"rol":1,"token":"abc"}"#));
        assert_eq!(sessions.load(), Some(Session::new(5, Role::Advisor, "abc")));
    }

    #[test]
    fn test_load_accepts_numeric_strings() {
        let (_, sessions) = store_with(Some(r#"{"id":"7","rol":"2","token":"xyz"}"#));
        assert_eq!(sessions.load(), Some(Session::new(7, Role::Farmer, "xyz")));
    }

    #[test]
    fn test_load_fails_closed() {
        for raw in [
            r#"{"rol":1,"token":"abc"}"#,
            r#"{"id":5,"token":"abc"}"#,
            r#"{"id":5,"rol":1}"#,
            r#"{"id":5,"rol":1,"token":"  "}"#,
            r#"{"id":0,"rol":1,"token":"abc"}"#,
            r#"{"id":5,"rol":3,"token":"abc"}"#,
            "not json",
        ] {
            let (_, sessions) = store_with(Some(raw));
            assert_eq!(sessions.load(), None, "accepted {raw}");
        }
    }

    #[test]
    fn test_guard_clears_incomplete_session() {
        let (memory, sessions) = store_with(Some(r#"{"id":5,"rol":1}"#));

        assert_eq!(sessions.require_role(Role::Advisor), Err(SessionError::LoginRequired));
        assert_eq!(memory.get(SESSION_KEY).unwrap(), None);
        assert_eq!(memory.get(PROFILE_KEY).unwrap(), None);
        assert_eq!(memory.get(LANGUAGE_KEY).unwrap().as_deref(), Some("en"));
    }

    #[test]
    fn test_guard_rejects_wrong_role() {
        let (memory, sessions) = store_with(Some(r#"{"id":7,"rol":2,"token":"xyz"}"#));

        assert!(sessions.require_role(Role::Advisor).is_err());
        assert_eq!(memory.get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn test_require_any() {
        let (_, sessions) = store_with(Some(r#"{"id":7,"rol":2,"token":"xyz"}"#));
        assert_eq!(sessions.require_any().unwrap().role, Role::Farmer);

        let (_, sessions) = store_with(None);
        assert_eq!(sessions.require_any(), Err(SessionError::LoginRequired));
    }

    #[test]
    fn test_update_display_name_keeps_token() {
        let (_, sessions) = store_with(Some(r#"{"id":5,"rol":1,"token":"abc"}"#));
        sessions.update_display_name("Ana").unwrap();

        let session = sessions.load().unwrap();
        assert_eq!(session.display_name.as_deref(), Some("Ana"));
        assert_eq!(session.token, "abc");
    }

    #[test]
    fn test_language_preference() {
        let (_, sessions) = store_with(None);
        assert_eq!(sessions.language().as_deref(), Some("en"));
        sessions.set_language("es").unwrap();
        assert_eq!(sessions.language().as_deref(), Some("es"));
    }
}
