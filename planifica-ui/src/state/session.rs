//! Session Persistence
//!
//! The signed-in session lives in localStorage under the `auth_token` and
//! `currentUser` keys so a reload keeps the user signed in.

use serde::{Deserialize, Serialize};

const TOKEN_KEY: &str = "auth_token";
const USER_KEY: &str = "currentUser";

/// The signed-in user as kept client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nombre: Option<String>,
}

/// Token plus user, the unit the UI works with.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredSession {
    pub access_token: String,
    pub user: StoredUser,
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Load the persisted session, if both keys are present and parse.
pub fn load_session() -> Option<StoredSession> {
    let storage = local_storage()?;
    let access_token = storage.get_item(TOKEN_KEY).ok().flatten()?;
    let user_json = storage.get_item(USER_KEY).ok().flatten()?;
    let user: StoredUser = serde_json::from_str(&user_json).ok()?;
    Some(StoredSession { access_token, user })
}

/// Persist a session.
pub fn save_session(session: &StoredSession) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, &session.access_token);
        if let Ok(user_json) = serde_json::to_string(&session.user) {
            let _ = storage.set_item(USER_KEY, &user_json);
        }
    }
}

/// Drop the persisted session (sign out).
pub fn clear_session() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_user_roundtrip() {
        let user = StoredUser {
            id: "u-1".into(),
            email: Some("ana@example.com".into()),
            nombre: Some("Ana".into()),
        };
        let json = serde_json::to_string(&user).unwrap();
        let parsed: StoredUser = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }

    #[test]
    fn test_stored_user_tolerates_missing_fields() {
        let parsed: StoredUser = serde_json::from_str(r#"{"id": "u-2"}"#).unwrap();
        assert_eq!(parsed.id, "u-2");
        assert!(parsed.email.is_none());
        assert!(parsed.nombre.is_none());
    }
}
