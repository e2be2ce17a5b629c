//! Session holder: at most one active username, persisted until logout

use eyre::Result;

use super::{AccountTable, USERS_KEY};
use crate::store::KvStore;
use crate::store::document;

/// Key of the session value
pub const SESSION_KEY: &str = "session";

pub struct SessionHolder<'a> {
    store: &'a dyn KvStore,
}

impl<'a> SessionHolder<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    /// Replace the active session
    pub(super) fn begin(&self, username: &str) -> Result<()> {
        document::write(self.store, SESSION_KEY, &username.to_string())
    }

    /// Clear the active session; clearing an absent session is fine
    pub fn logout(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        log::info!("Session cleared");
        Ok(())
    }

    /// The active username, if it names an existing account
    pub fn current_user(&self) -> Result<Option<String>> {
        let Some(username) = document::read::<String>(self.store, SESSION_KEY)? else {
            return Ok(None);
        };

        let users: AccountTable = document::read_or_default(self.store, USERS_KEY)?;
        if !users.contains_key(&username) {
            log::warn!("Ignoring session for unknown account {}", username);
            return Ok(None);
        }

        Ok(Some(username))
    }
}
