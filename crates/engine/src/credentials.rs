//! Credential table and login state.
//!
//! Credentials live in a small JSON file mapping usernames to plain
//! passwords. Verification is an exact string match, nothing more;
//! the file is trusted local configuration, not a user store.

use std::{collections::BTreeMap, fs::File, io::Read, path::Path};

use serde::{Deserialize, Serialize};

use crate::ResultEngine;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
struct UserRecord {
    password: String,
}

/// Username to password table, kept in the credential JSON file.
///
/// ```json
/// {
///   "admin": { "password": "admin123" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialTable {
    users: BTreeMap<String, UserRecord>,
}

impl CredentialTable {
    /// Loads the table from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> ResultEngine<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(file)
    }

    /// Loads the table from any JSON stream.
    pub fn from_json_reader<R: Read>(reader: R) -> ResultEngine<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Returns `true` when the pair matches a stored user exactly.
    ///
    /// Case-sensitive, no trimming. Anything else is a failed login.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|record| record.password == password)
    }

    #[must_use]
    pub fn contains(&self, username: &str) -> bool {
        self.users.contains_key(username)
    }

    /// Adds a user. Returns `false` if the username is already taken.
    pub fn insert(&mut self, username: String, password: String) -> bool {
        if self.users.contains_key(&username) {
            return false;
        }
        self.users.insert(username, UserRecord { password });
        true
    }

    /// Removes a user. Returns `false` if the username was not there.
    pub fn remove(&mut self, username: &str) -> bool {
        self.users.remove(username).is_some()
    }

    /// Usernames in alphabetical order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

/// Login state of one client session.
///
/// `Anonymous` turns into `Authenticated` only on a successful
/// [`CredentialTable::verify`], and logout always lands back on
/// `Anonymous` no matter the current state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(String),
}

impl AuthState {
    /// Attempts a login, returning `true` on success.
    ///
    /// On failure the state is left untouched.
    pub fn login(&mut self, table: &CredentialTable, username: &str, password: &str) -> bool {
        if table.verify(username, password) {
            *self = AuthState::Authenticated(username.to_string());
            true
        } else {
            false
        }
    }

    pub fn logout(&mut self) {
        *self = AuthState::Anonymous;
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// The logged-in username, if any.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthState::Anonymous => None,
            AuthState::Authenticated(username) => Some(username),
        }
    }
}
