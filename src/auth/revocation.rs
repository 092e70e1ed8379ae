//! Revocation ledger for logged-out session tokens
//!
//! A revoked token is recorded with its original expiry so the sweep can
//! drop the entry once the token would have expired anyway. Lookups stay
//! correct even if stale entries accumulate between sweeps.

use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Storage interface for revoked session tokens
#[async_trait]
pub trait RevocationLedger: Send + Sync {
    /// Record a token as revoked until its natural expiry.
    ///
    /// Idempotent: revoking the same token twice must not error.
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()>;

    /// Exact string match against recorded tokens
    async fn is_revoked(&self, token: &str) -> Result<bool>;

    /// Delete entries whose expiry has passed, returning how many were removed
    async fn sweep_expired(&self) -> Result<u64>;
}

/// In-process ledger backed by a map.
///
/// Used by the test suite and for running without a database; production
/// uses the Postgres-backed ledger in `db::tokens`.
#[derive(Default)]
pub struct MemoryLedger {
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RevocationLedger for MemoryLedger {
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> Result<()> {
        self.revoked
            .write()
            .await
            .insert(token.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, token: &str) -> Result<bool> {
        Ok(self.revoked.read().await.contains_key(token))
    }

    async fn sweep_expired(&self) -> Result<u64> {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;
        let before = revoked.len();
        revoked.retain(|_, expiry| *expiry > now);
        Ok((before - revoked.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_revoke_and_lookup() {
        let ledger = MemoryLedger::new();
        let expiry = Utc::now() + Duration::hours(24);

        ledger.revoke("token-a", expiry).await.unwrap();
        assert!(ledger.is_revoked("token-a").await.unwrap());
        assert!(!ledger.is_revoked("token-b").await.unwrap());
    }

    #[tokio::test]
    async fn test_double_revoke_is_idempotent() {
        let ledger = MemoryLedger::new();
        let expiry = Utc::now() + Duration::hours(24);

        ledger.revoke("token-a", expiry).await.unwrap();
        ledger.revoke("token-a", expiry).await.unwrap();
        assert!(ledger.is_revoked("token-a").await.unwrap());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_expired() {
        let ledger = MemoryLedger::new();
        ledger
            .revoke("stale", Utc::now() - Duration::hours(1))
            .await
            .unwrap();
        ledger
            .revoke("live", Utc::now() + Duration::hours(1))
            .await
            .unwrap();

        let removed = ledger.sweep_expired().await.unwrap();
        assert_eq!(removed, 1);
        assert!(!ledger.is_revoked("stale").await.unwrap());
        assert!(ledger.is_revoked("live").await.unwrap());
    }

    #[tokio::test]
    async fn test_stale_entries_still_match_before_sweep() {
        let ledger = MemoryLedger::new();
        ledger
            .revoke("stale", Utc::now() - Duration::hours(1))
            .await
            .unwrap();

        assert!(ledger.is_revoked("stale").await.unwrap());
    }
}
