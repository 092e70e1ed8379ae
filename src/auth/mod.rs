//! Authentication and session revocation
//!
//! Session tokens are signed claims verified statelessly; logout places the
//! exact token string on a revocation ledger that the request gate consults
//! before signature verification.

pub mod credentials;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod revocation;

pub use credentials::{CredentialStore, MemoryCredentials};
pub use jwt::{Claims, TokenSigner};
pub use middleware::{authenticate, require_auth, AuthedUser};
pub use revocation::{MemoryLedger, RevocationLedger};
