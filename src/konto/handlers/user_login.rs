use axum::{Json, extract::Extension, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::auth::{password, token::TokenKeys};
use crate::konto::{error::ServiceError, models::AccountStatus, storage};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserLogin {
    pub username: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Debug)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[utoipa::path(
    post,
    path= "/login",
    request_body = UserLogin,
    responses (
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Unknown username or wrong password"),
        (status = 403, description = "Account is pending approval or disabled"),
        (status = 500, description = "Server error"),
    ),
    tag= "konto"
)]
#[instrument(skip(payload))]
pub async fn login(
    pool: Extension<PgPool>,
    keys: Extension<Arc<TokenKeys>>,
    payload: Option<Json<UserLogin>>,
) -> Result<impl IntoResponse, ServiceError> {
    let Some(Json(user)) = payload else {
        return Err(ServiceError::MissingPayload);
    };

    let Some(account) = storage::find_by_username(&pool, &user.username).await? else {
        return Err(ServiceError::InvalidCredentials);
    };

    // the status gate comes first: a pending or disabled account gets the same
    // answer whether or not the password matches
    match account.status {
        AccountStatus::Pending => return Err(ServiceError::AccountPending),
        AccountStatus::Disabled => return Err(ServiceError::AccountDisabled),
        AccountStatus::Active => {}
    }

    if !password::verify(&user.password, &account.password_hash)? {
        return Err(ServiceError::InvalidCredentials);
    }

    let token = keys.issue(account.id)?;

    debug!("Login successful for account {}", account.id);

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
