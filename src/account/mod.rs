//! Account registry
//!
//! Accounts are permanent: there is no update or delete. Credentials are
//! stored and compared as plain values.

pub mod session;

use eyre::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::store::KvStore;
use crate::store::document;
pub use session::SessionHolder;

/// Key of the accounts document
pub const USERS_KEY: &str = "users";

/// Stored credential record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub password: String,
}

/// username -> credentials, in signup order
pub type AccountTable = IndexMap<String, Credentials>;

pub struct AccountRegistry<'a> {
    store: &'a dyn KvStore,
}

impl<'a> AccountRegistry<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self { store }
    }

    fn read(&self) -> Result<AccountTable> {
        document::read_or_default(self.store, USERS_KEY)
    }

    /// Create an account and make it the active session.
    ///
    /// Returns `false` when the username is blank or already taken; the
    /// existing account is left untouched.
    pub fn signup(&self, username: &str, password: &str) -> Result<bool> {
        if username.trim().is_empty() {
            log::info!("Signup rejected: empty username");
            return Ok(false);
        }

        let mut users = self.read()?;
        if users.contains_key(username) {
            log::info!("Signup rejected: {} already exists", username);
            return Ok(false);
        }

        users.insert(
            username.to_string(),
            Credentials {
                password: password.to_string(),
            },
        );
        document::write(self.store, USERS_KEY, &users)?;
        SessionHolder::new(self.store).begin(username)?;

        log::info!("Created account {}", username);
        Ok(true)
    }

    /// Make `username` the active session if the password matches exactly
    pub fn login(&self, username: &str, password: &str) -> Result<bool> {
        let users = self.read()?;
        match users.get(username) {
            Some(creds) if creds.password == password => {
                SessionHolder::new(self.store).begin(username)?;
                log::info!("Logged in as {}", username);
                Ok(true)
            }
            Some(_) => {
                log::info!("Login rejected for {}: wrong password", username);
                Ok(false)
            }
            None => {
                log::info!("Login rejected for {}: no such account", username);
                Ok(false)
            }
        }
    }
}
