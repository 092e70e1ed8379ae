//! Database connection handling

use std::sync::Arc;
use tokio_postgres::{Client, NoTls};

use crate::config::DatabaseConfig;
use crate::error::Result;

/// Shared handle to the PostgreSQL connection.
///
/// tokio-postgres pipelines queries over a single connection; handlers share
/// the client through this cheap clone.
#[derive(Clone)]
pub struct Db {
    client: Arc<Client>,
}

impl Db {
    /// Connect to PostgreSQL and spawn the connection driver
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let (client, connection) =
            tokio_postgres::connect(&config.connection_string(), NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        Ok(Self {
            client: Arc::new(client),
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Create the tables if they don't exist
    pub async fn init_schema(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id BIGSERIAL PRIMARY KEY,
                    email TEXT UNIQUE NOT NULL,
                    password_hash TEXT NOT NULL
                );
                CREATE TABLE IF NOT EXISTS items (
                    id BIGSERIAL PRIMARY KEY,
                    name TEXT NOT NULL,
                    description TEXT,
                    image TEXT,
                    status TEXT NOT NULL,
                    email TEXT NOT NULL,
                    date TIMESTAMPTZ NOT NULL,
                    location TEXT
                );
                CREATE TABLE IF NOT EXISTS revoked_tokens (
                    id BIGSERIAL PRIMARY KEY,
                    token TEXT NOT NULL,
                    expiry TIMESTAMPTZ NOT NULL
                );
                CREATE INDEX IF NOT EXISTS revoked_tokens_token_idx
                    ON revoked_tokens (token);",
            )
            .await?;

        tracing::debug!("database schema ready");
        Ok(())
    }
}
