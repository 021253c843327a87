use axum::{Json, extract::Extension, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::auth::{middleware::Identity, password};
use crate::konto::{
    error::ServiceError,
    handlers::{StatusMessage, normalize_optional},
    models::AccountStatus,
    storage,
};

/// All fields optional; an empty update is a no-op that still answers 200.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserUpdate {
    pub username: Option<String>,
    #[serde(rename = "oldPassword")]
    pub old_password: Option<String>,
    pub password: Option<String>,
    pub status: Option<AccountStatus>,
}

#[utoipa::path(
    put,
    path= "/updateuser",
    request_body = UserUpdate,
    responses (
        (status = 200, description = "User updated successfully", body = StatusMessage),
        (status = 400, description = "Missing payload or rejected password change"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Server error"),
    ),
    tag= "konto"
)]
#[instrument(skip(payload))]
pub async fn update_user(
    identity: Extension<Identity>,
    pool: Extension<PgPool>,
    payload: Option<Json<UserUpdate>>,
) -> Result<impl IntoResponse, ServiceError> {
    let Some(Json(update)) = payload else {
        return Err(ServiceError::MissingPayload);
    };

    let Some(mut account) = storage::find_by_id(&pool, identity.account_id).await? else {
        return Err(ServiceError::NotFound);
    };

    // a password change is keyed on `password` being present and requires the
    // current password to verify first
    if let Some(new_password) = &update.password {
        let verified = match &update.old_password {
            Some(old_password) => password::verify(old_password, &account.password_hash)?,
            None => false,
        };

        if !verified {
            return Err(ServiceError::InvalidOldPassword);
        }

        if password::verify(new_password, &account.password_hash)? {
            return Err(ServiceError::SamePassword);
        }

        account.password_hash = password::hash(new_password)?;
    }

    if let Some(username) = normalize_optional(update.username) {
        account.username = username;
    }

    if let Some(status) = update.status {
        account.status = status;
    }

    // no uniqueness re-check on username here; a collision bubbles up from the
    // unique index as a server error
    storage::save(&pool, &mut account).await?;

    debug!("Updated account {}", account.id);

    Ok(Json(StatusMessage {
        message: "User updated successfully".to_string(),
        status: account.status,
    }))
}
