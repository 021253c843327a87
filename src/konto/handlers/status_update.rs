use axum::{Json, extract::Extension, response::IntoResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{debug, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::konto::{
    error::ServiceError, handlers::StatusMessage, models::AccountStatus, storage,
};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct StatusUpdate {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub status: String,
}

#[utoipa::path(
    put,
    path= "/updateStatus",
    request_body = StatusUpdate,
    responses (
        (status = 200, description = "User status updated successfully", body = StatusMessage),
        (status = 400, description = "Unknown status value or malformed user id"),
        (status = 404, description = "No account with that id"),
        (status = 500, description = "Server error"),
    ),
    tag= "konto"
)]
#[instrument]
pub async fn update_status(
    pool: Extension<PgPool>,
    payload: Option<Json<StatusUpdate>>,
) -> Result<impl IntoResponse, ServiceError> {
    let Some(Json(request)) = payload else {
        return Err(ServiceError::MissingPayload);
    };

    let Some(status) = AccountStatus::parse(&request.status) else {
        return Err(ServiceError::InvalidStatus);
    };

    let Ok(account_id) = Uuid::parse_str(request.user_id.trim()) else {
        return Err(ServiceError::InvalidUserId);
    };

    let Some(mut account) = storage::find_by_id(&pool, account_id).await? else {
        return Err(ServiceError::NotFound);
    };

    account.status = status;
    storage::save(&pool, &mut account).await?;

    debug!("Account {} status set to {}", account.id, account.status);

    Ok(Json(StatusMessage {
        message: "User status updated successfully".to_string(),
        status: account.status,
    }))
}
