//! Postgres-backed revocation ledger

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::Db;
use crate::auth::revocation::RevocationLedger;
use crate::error::Result;

/// Revocation ledger persisted in the `revoked_tokens` table
#[derive(Clone)]
pub struct PgRevocationLedger {
    db: Db,
}

impl PgRevocationLedger {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RevocationLedger for PgRevocationLedger {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        // Plain append; duplicate rows are harmless for lookup correctness
        // and removed together by the sweep.
        self.db
            .client()
            .execute(
                "INSERT INTO revoked_tokens (token, expiry) VALUES ($1, $2)",
                &[&token, &expires_at],
            )
            .await?;

        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool> {
        let row = self
            .db
            .client()
            .query_one(
                "SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token = $1)",
                &[&token],
            )
            .await?;

        Ok(row.get(0))
    }

    async fn sweep_expired(&self) -> Result<u64> {
        let removed = self
            .db
            .client()
            .execute("DELETE FROM revoked_tokens WHERE expiry < now()", &[])
            .await?;

        Ok(removed)
    }
}
