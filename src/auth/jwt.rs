//! Session token signing and verification

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims embedded in every session token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl Claims {
    /// The user ID the token was issued to
    pub fn user_id(&self) -> Result<i64> {
        self.sub.parse().map_err(|_| Error::InvalidToken)
    }

    /// The token's absolute expiry
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Signs and verifies session tokens with a process-wide secret.
///
/// Constructed once at startup from configuration; rotating the secret
/// invalidates all outstanding tokens.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_hours: i64,
}

impl TokenSigner {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_hours,
        }
    }

    /// Issue a signed token for a user, expiring after the configured TTL
    pub fn issue(&self, user_id: i64) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_hours * 3600,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Config(format!("Failed to create token: {}", e)))
    }

    /// Validate signature and expiry, returning the embedded claims.
    ///
    /// An expired-but-correctly-signed token fails with `TokenExpired`; a
    /// malformed or mis-signed token fails with `InvalidToken`. Callers map
    /// these to different response statuses.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => Error::TokenExpired,
                _ => Error::InvalidToken,
            })
    }

    /// Extract the expiry claim without checking signature or expiry.
    ///
    /// Only used when enqueueing a token for revocation, where the token has
    /// already been admitted as the caller's own bearer credential.
    pub fn decode_expiry(&self, token: &str) -> Result<DateTime<Utc>> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims.expires_at())
            .map_err(|_| Error::InvalidToken)
    }
}
