//! PostgreSQL persistence

mod client;
pub mod items;
pub mod tokens;
pub mod users;

pub use client::Db;
pub use tokens::PgRevocationLedger;
pub use users::PgCredentialStore;
