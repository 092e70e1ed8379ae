//! API route handlers

use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::server::AppState;
use super::uploads;
use crate::auth::middleware::AuthedUser;
use crate::auth::models::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest};
use crate::db::items::{self, NewItem};
use crate::db::users;
use crate::error::{Error, Result};

// Health check

pub async fn health() -> impl IntoResponse {
    Json(MessageResponse::new("healthy"))
}

// Session routes

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    validate_credentials(&req.email, &req.password)?;

    let user_id = state.users.create(&req.email, &req.password).await?;
    let token = state.signer.issue(user_id)?;

    tracing::info!(user_id, "registered new user");

    Ok((StatusCode::CREATED, Json(AuthResponse { user_id, token })))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user_id = state.users.verify(&req.email, &req.password).await?;
    let token = state.signer.issue(user_id)?;

    Ok(Json(AuthResponse { user_id, token }))
}

/// Revoke the caller's own token until its natural expiry.
///
/// The gate has already admitted the token, so decoding the expiry without
/// re-verifying the signature is safe here.
pub async fn logout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> Result<impl IntoResponse> {
    let expiry = state.signer.decode_expiry(&user.token)?;
    state.ledger.revoke(&user.token, expiry).await?;

    tracing::info!(user_id = %user.claims.sub, "session revoked");

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

// Item routes

pub async fn list_items(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = items::list(&state.db).await?;
    Ok(Json(items))
}

pub async fn submit_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    // The uploader email comes from the verified identity, not the form
    let uploader = users::find_by_id(&state.db, user.claims.user_id()?)
        .await?
        .ok_or(Error::Unauthenticated)?;

    let mut name = None;
    let mut description = None;
    let mut status = None;
    let mut location = None;
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(read_text(field).await?),
            "description" => description = Some(read_text(field).await?),
            "status" => status = Some(read_text(field).await?),
            "location" => location = Some(read_text(field).await?),
            "image" => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::BadRequest(e.to_string()))?;
                if !bytes.is_empty() {
                    image =
                        Some(uploads::save_image(&state.uploads_dir, &original_name, &bytes).await?);
                }
            }
            _ => {}
        }
    }

    let name = name
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("Item name is required".to_string()))?;
    let status = status
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| Error::BadRequest("Item status is required".to_string()))?;

    let item = items::insert(
        &state.db,
        NewItem {
            name,
            description,
            image,
            status,
            email: uploader.email,
            location,
        },
    )
    .await?;

    tracing::info!(item_id = item.id, "item submitted");

    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let uploader = users::find_by_id(&state.db, user.claims.user_id()?)
        .await?
        .ok_or(Error::Unauthenticated)?;

    let item = items::find_by_id(&state.db, id)
        .await?
        .ok_or(Error::ItemNotFound(id))?;

    if item.email != uploader.email {
        return Err(Error::NotItemOwner);
    }

    // Errors if the row vanished between the ownership lookup and the delete
    items::delete(&state.db, id).await?;

    tracing::info!(item_id = id, "item deleted");

    Ok(Json(MessageResponse::new("Item deleted successfully")))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field
        .text()
        .await
        .map_err(|e| Error::BadRequest(e.to_string()))
}

fn validate_credentials(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || !email.contains('@') {
        return Err(Error::BadRequest("A valid email is required".to_string()));
    }
    if password.is_empty() {
        return Err(Error::BadRequest("A password is required".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("a@x.com", "pw1").is_ok());
        assert!(validate_credentials("", "pw1").is_err());
        assert!(validate_credentials("not-an-email", "pw1").is_err());
        assert!(validate_credentials("a@x.com", "").is_err());
    }
}
