//! User credential storage

use async_trait::async_trait;
use tokio_postgres::error::SqlState;

use super::Db;
use crate::auth::credentials::CredentialStore;
use crate::auth::password;
use crate::error::{Error, Result};

/// A registered user row
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Insert a user, failing with `DuplicateEmail` if the email is taken.
///
/// Concurrent registrations race on the UNIQUE constraint; the loser gets
/// the same error as a plain duplicate.
pub async fn create(db: &Db, email: &str, password_hash: &str) -> Result<i64> {
    let row = db
        .client()
        .query_one(
            "INSERT INTO users (email, password_hash) VALUES ($1, $2) RETURNING id",
            &[&email, &password_hash],
        )
        .await
        .map_err(|e| {
            if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                Error::DuplicateEmail
            } else {
                Error::Database(e)
            }
        })?;

    Ok(row.get(0))
}

/// Look up a user by email
pub async fn find_by_email(db: &Db, email: &str) -> Result<Option<User>> {
    let row = db
        .client()
        .query_opt(
            "SELECT id, email, password_hash FROM users WHERE email = $1",
            &[&email],
        )
        .await?;

    Ok(row.map(|row| User {
        id: row.get(0),
        email: row.get(1),
        password_hash: row.get(2),
    }))
}

/// Credential store persisted in the `users` table
#[derive(Clone)]
pub struct PgCredentialStore {
    db: Db,
}

impl PgCredentialStore {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, email: &str, plaintext: &str) -> Result<i64> {
        let password_hash = password::hash_password(plaintext)?;
        create(&self.db, email, &password_hash).await
    }

    async fn verify(&self, email: &str, plaintext: &str) -> Result<i64> {
        let user = find_by_email(&self.db, email)
            .await?
            .ok_or(Error::InvalidCredentials)?;

        if !password::verify_password(plaintext, &user.password_hash)? {
            return Err(Error::InvalidCredentials);
        }

        Ok(user.id)
    }
}

/// Look up a user by id
pub async fn find_by_id(db: &Db, id: i64) -> Result<Option<User>> {
    let row = db
        .client()
        .query_opt(
            "SELECT id, email, password_hash FROM users WHERE id = $1",
            &[&id],
        )
        .await?;

    Ok(row.map(|row| User {
        id: row.get(0),
        email: row.get(1),
        password_hash: row.get(2),
    }))
}
