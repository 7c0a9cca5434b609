//! # Auth Gate
//!
//! Mock session state consulted by the router's navigation guard.
//!
//! There is no real authentication: any non-empty email logs in. The session
//! is persisted to local storage as JSON so it survives restarts; an
//! unreadable slot counts as logged out.

use crate::primitives::{AUTH_STORAGE_KEY, LEGACY_AUTH_STORAGE_KEY};
use crate::storage::KeyValueStore;
use crate::RosterError;
use serde::{Deserialize, Serialize};

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub email: String,
    pub name: String,
}

/// Serialized form of the auth slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedAuth {
    #[serde(default)]
    is_authenticated: bool,
    #[serde(default)]
    user: Option<SessionUser>,
}

/// Session flag plus user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthGate {
    is_authenticated: bool,
    user: Option<SessionUser>,
}

impl AuthGate {
    /// A logged-out gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the session from local storage.
    ///
    /// Missing, unreadable or malformed slots yield a logged-out gate.
    #[must_use]
    pub fn restore(storage: &dyn KeyValueStore) -> Self {
        let Ok(Some(raw)) = storage.get(AUTH_STORAGE_KEY) else {
            return Self::default();
        };
        match serde_json::from_str::<PersistedAuth>(&raw) {
            Ok(persisted) => Self {
                is_authenticated: persisted.is_authenticated,
                user: persisted.user,
            },
            Err(_) => Self::default(),
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    #[must_use]
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Log in. The password is not checked.
    ///
    /// The in-memory session is established before persisting; a storage
    /// failure is returned but leaves the gate authenticated.
    pub fn login(
        &mut self,
        storage: &mut dyn KeyValueStore,
        email: &str,
        _password: &str,
    ) -> Result<&SessionUser, RosterError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(RosterError::Validation("Email is required".into()));
        }
        let local = email.split('@').next().unwrap_or_default();
        let name = if local.is_empty() { "User" } else { local };

        self.is_authenticated = true;
        let user = self.user.insert(SessionUser {
            email: email.to_string(),
            name: name.to_string(),
        });

        let persisted = PersistedAuth {
            is_authenticated: true,
            user: Some(user.clone()),
        };
        let raw = serde_json::to_string(&persisted)
            .map_err(|e| RosterError::Serialization(e.to_string()))?;
        storage.set(AUTH_STORAGE_KEY, &raw)?;
        Ok(user)
    }

    /// Log out and clear both the current and the legacy auth slots.
    pub fn logout(&mut self, storage: &mut dyn KeyValueStore) -> Result<(), RosterError> {
        self.is_authenticated = false;
        self.user = None;
        storage.remove(AUTH_STORAGE_KEY)?;
        storage.remove(LEGACY_AUTH_STORAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn login_persists_and_restores() {
        let mut storage = MemoryStorage::new();
        let mut gate = AuthGate::new();
        let user = gate
            .login(&mut storage, "ada@example.com", "secret")
            .expect("login")
            .clone();
        assert_eq!(user.name, "ada");

        let restored = AuthGate::restore(&storage);
        assert!(restored.is_authenticated());
        assert_eq!(restored.user(), Some(&user));
    }

    #[test]
    fn email_without_local_part_gets_default_name() {
        let mut storage = MemoryStorage::new();
        let mut gate = AuthGate::new();
        let user = gate.login(&mut storage, "@example.com", "").expect("login");
        assert_eq!(user.name, "User");
    }

    #[test]
    fn empty_email_is_rejected() {
        let mut storage = MemoryStorage::new();
        let mut gate = AuthGate::new();
        assert!(gate.login(&mut storage, "  ", "x").is_err());
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn logout_clears_slots() {
        let mut storage = MemoryStorage::new();
        storage.set(LEGACY_AUTH_STORAGE_KEY, "old").expect("set");
        let mut gate = AuthGate::new();
        gate.login(&mut storage, "ada@example.com", "").expect("login");
        gate.logout(&mut storage).expect("logout");

        assert!(!gate.is_authenticated());
        assert!(storage.is_empty());
        assert!(!AuthGate::restore(&storage).is_authenticated());
    }

    #[test]
    fn malformed_slot_counts_as_logged_out() {
        let mut storage = MemoryStorage::new();
        storage.set(AUTH_STORAGE_KEY, "{not json").expect("set");
        assert_eq!(AuthGate::restore(&storage), AuthGate::new());
    }

    #[test]
    fn partial_slot_uses_defaults() {
        let mut storage = MemoryStorage::new();
        storage.set(AUTH_STORAGE_KEY, "{}").expect("set");
        let gate = AuthGate::restore(&storage);
        assert!(!gate.is_authenticated());
        assert_eq!(gate.user(), None);
    }
}
