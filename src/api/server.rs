//! HTTP API server

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::credentials::CredentialStore;
use crate::auth::middleware::require_auth;
use crate::auth::revocation::RevocationLedger;
use crate::auth::TokenSigner;
use crate::config::Config;
use crate::db::{Db, PgCredentialStore, PgRevocationLedger};
use crate::error::Result;

use super::routes;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub signer: Arc<TokenSigner>,
    pub users: Arc<dyn CredentialStore>,
    pub ledger: Arc<dyn RevocationLedger>,
    pub uploads_dir: Arc<PathBuf>,
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let db = Db::connect(&config.database).await?;
    db.init_schema().await?;

    tokio::fs::create_dir_all(&config.server.uploads_dir).await?;

    let state = AppState {
        db: db.clone(),
        signer: Arc::new(TokenSigner::new(
            &config.auth.secret,
            config.auth.token_ttl_hours,
        )),
        users: Arc::new(PgCredentialStore::new(db.clone())),
        ledger: Arc::new(PgRevocationLedger::new(db)),
        uploads_dir: Arc::new(config.server.uploads_dir.clone()),
    };

    spawn_revocation_sweep(
        state.ledger.clone(),
        Duration::from_secs(config.auth.sweep_interval_secs),
    );

    let app = create_router(state, &config.server.uploads_dir);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState, uploads_dir: &Path) -> Router {
    let protected = Router::new()
        .route("/logout", post(routes::logout))
        .route("/submit-item", post(routes::submit_item))
        .route("/delete-item/{id}", delete(routes::delete_item))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        .route("/register", post(routes::register))
        .route("/login", post(routes::login))
        .route("/items", get(routes::list_items))
        .route("/api/health", get(routes::health))
        .merge(protected)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Periodically prune ledger entries for tokens that have expired anyway
fn spawn_revocation_sweep(ledger: Arc<dyn RevocationLedger>, period: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick fires immediately; nothing to sweep yet
        ticker.tick().await;

        loop {
            ticker.tick().await;
            match ledger.sweep_expired().await {
                Ok(0) => {}
                Ok(removed) => {
                    tracing::info!("swept {} expired revoked tokens", removed);
                }
                Err(e) => {
                    tracing::error!("revocation sweep failed: {}", e);
                }
            }
        }
    });
}
