use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::auth::password;
use crate::konto::{
    error::ServiceError,
    handlers::StatusMessage,
    models::AccountStatus,
    storage::{self, StoreError},
};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserRegister {
    pub username: String,
    pub password: String,
    pub status: Option<AccountStatus>,
}

#[utoipa::path(
    post,
    path= "/register",
    request_body = UserRegister,
    responses (
        (status = 201, description = "User registered successfully", body = StatusMessage),
        (status = 400, description = "Missing payload, blank username, or username already in use"),
        (status = 500, description = "Server error"),
    ),
    tag= "konto"
)]
#[instrument(skip(payload))]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<UserRegister>>,
) -> Result<impl IntoResponse, ServiceError> {
    let Some(Json(user)) = payload else {
        return Err(ServiceError::MissingPayload);
    };

    let username = user.username.trim();
    if username.is_empty() {
        return Err(ServiceError::UsernameRequired);
    }

    if storage::find_by_username(&pool, username).await?.is_some() {
        return Err(ServiceError::UsernameTaken);
    }

    let password_hash = password::hash(&user.password)?;
    let status = user.status.unwrap_or_default();

    let account = match storage::create(&pool, username, &password_hash, status).await {
        Ok(account) => account,
        // two concurrent registrations can both pass the lookup above; the
        // unique index settles it
        Err(StoreError::DuplicateUsername) => return Err(ServiceError::UsernameTaken),
        Err(err) => return Err(err.into()),
    };

    debug!("Registered account {}", account.id);

    Ok((
        StatusCode::CREATED,
        Json(StatusMessage {
            message: "User registered successfully".to_string(),
            status: account.status,
        }),
    ))
}
