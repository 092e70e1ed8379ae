//! Credential store for registered users

use crate::auth::password;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage interface for user credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Register a user, storing a one-way hash of the password.
    ///
    /// Fails with `DuplicateEmail` if the email is already registered;
    /// no partial record is left behind in that case.
    async fn create(&self, email: &str, plaintext: &str) -> Result<i64>;

    /// Check credentials, returning the user id on success.
    ///
    /// Fails with `InvalidCredentials` whether the email is absent or the
    /// password does not match; callers cannot tell the two apart.
    async fn verify(&self, email: &str, plaintext: &str) -> Result<i64>;
}

/// In-process credential store backed by a map.
///
/// Used by the test suite and for running without a database; production
/// uses the Postgres-backed store in `db::users`.
#[derive(Default)]
pub struct MemoryCredentials {
    users: RwLock<HashMap<String, (i64, String)>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentials {
    async fn create(&self, email: &str, plaintext: &str) -> Result<i64> {
        let mut users = self.users.write().await;
        if users.contains_key(email) {
            return Err(Error::DuplicateEmail);
        }

        let hash = password::hash_password(plaintext)?;
        let id = users.len() as i64 + 1;
        users.insert(email.to_string(), (id, hash));
        Ok(id)
    }

    async fn verify(&self, email: &str, plaintext: &str) -> Result<i64> {
        let users = self.users.read().await;
        let (id, hash) = users.get(email).ok_or(Error::InvalidCredentials)?;

        if !password::verify_password(plaintext, hash)? {
            return Err(Error::InvalidCredentials);
        }

        Ok(*id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_verify() {
        let store = MemoryCredentials::new();
        let id = store.create("a@x.com", "pw1").await.unwrap();

        assert_eq!(store.verify("a@x.com", "pw1").await.unwrap(), id);
    }

    #[tokio::test]
    async fn test_duplicate_email_fails() {
        let store = MemoryCredentials::new();
        store.create("a@x.com", "pw1").await.unwrap();

        let result = store.create("a@x.com", "pw2").await;
        assert!(matches!(result, Err(Error::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_wrong_password_is_invalid_credentials() {
        let store = MemoryCredentials::new();
        store.create("a@x.com", "pw1").await.unwrap();

        let result = store.verify("a@x.com", "pw2").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email_is_invalid_credentials() {
        let store = MemoryCredentials::new();

        let result = store.verify("nobody@x.com", "pw1").await;
        assert!(matches!(result, Err(Error::InvalidCredentials)));
    }
}
