//! Read-only user directory.
//!
//! Built once from the `[[users]]` tables of [`Config`](crate::config::Config)
//! and shared behind an `Arc` for the lifetime of the process. Nothing
//! mutates it after construction, so lookups need no locking.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use crate::config::UserEntry;

/// Errors raised while building the directory from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Username cannot be empty")]
    EmptyUsername,

    #[error("Duplicate username: {0}")]
    DuplicateUsername(String),
}

/// Public identity of a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserRecord {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub disabled: bool,
}

/// A [`UserRecord`] together with its stored (transformed) secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub user: UserRecord,
    pub stored_secret: String,
}

impl From<&UserEntry> for CredentialRecord {
    fn from(entry: &UserEntry) -> Self {
        Self {
            user: UserRecord {
                username: entry.username.clone(),
                email: entry.email.clone(),
                full_name: entry.full_name.clone(),
                disabled: entry.disabled,
            },
            stored_secret: entry.hashed_password.clone(),
        }
    }
}

#[derive(Debug, Default)]
pub struct UserDirectory {
    entries: HashMap<String, CredentialRecord>,
}

impl UserDirectory {
    /// Builds the directory, rejecting empty and duplicate usernames.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] on the first invalid entry.
    pub fn from_entries(entries: &[UserEntry]) -> Result<Self, DirectoryError> {
        let mut map = HashMap::with_capacity(entries.len());

        for entry in entries {
            if entry.username.is_empty() {
                return Err(DirectoryError::EmptyUsername);
            }

            if map.contains_key(&entry.username) {
                return Err(DirectoryError::DuplicateUsername(entry.username.clone()));
            }

            map.insert(entry.username.clone(), CredentialRecord::from(entry));
        }

        Ok(Self { entries: map })
    }

    #[must_use]
    pub fn lookup(&self, username: &str) -> Option<&UserRecord> {
        self.entries.get(username).map(|record| &record.user)
    }

    #[must_use]
    pub fn credentials(&self, username: &str) -> Option<&CredentialRecord> {
        self.entries.get(username)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records sorted by username.
    #[must_use]
    pub fn users(&self) -> Vec<&UserRecord> {
        let mut users: Vec<_> = self.entries.values().map(|r| &r.user).collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        users
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(username: &str, disabled: bool) -> UserEntry {
        UserEntry {
            username: username.to_string(),
            email: None,
            full_name: None,
            hashed_password: format!("hashed{username}"),
            disabled,
        }
    }

    #[test]
    fn test_lookup_existing_and_missing() {
        let directory =
            UserDirectory::from_entries(&[entry("alice", false), entry("bob", true)]).unwrap();

        assert_eq!(directory.len(), 2);
        assert_eq!(directory.lookup("alice").unwrap().username, "alice");
        assert!(directory.lookup("bob").unwrap().disabled);
        assert!(directory.lookup("carol").is_none());
        assert!(directory.lookup("").is_none());
        assert!(directory.lookup("ALICE").is_none());
    }

    #[test]
    fn test_credentials_carry_stored_secret() {
        let directory = UserDirectory::from_entries(&[entry("alice", false)]).unwrap();
        let record = directory.credentials("alice").unwrap();
        assert_eq!(record.stored_secret, "hashedalice");
        assert_eq!(record.user.username, "alice");
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = UserDirectory::from_entries(&[entry("alice", false), entry("alice", true)])
            .unwrap_err();
        assert_eq!(err, DirectoryError::DuplicateUsername("alice".to_string()));
    }

    #[test]
    fn test_rejects_empty_username() {
        let err = UserDirectory::from_entries(&[entry("", false)]).unwrap_err();
        assert_eq!(err, DirectoryError::EmptyUsername);
    }

    #[test]
    fn test_users_sorted() {
        let directory = UserDirectory::from_entries(&[
            entry("zed", false),
            entry("amy", false),
            entry("kim", false),
        ])
        .unwrap();

        let names: Vec<_> = directory.users().iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, ["amy", "kim", "zed"]);
    }
}
