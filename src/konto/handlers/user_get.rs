use axum::{Json, extract::Extension, response::IntoResponse};
use sqlx::PgPool;
use tracing::instrument;

use crate::auth::middleware::Identity;
use crate::konto::{error::ServiceError, models::AccountView, storage};

#[utoipa::path(
    get,
    path= "/getuser",
    responses (
        (status = 200, description = "The authenticated account, password hash omitted", body = AccountView),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 404, description = "Account no longer exists"),
        (status = 500, description = "Server error"),
    ),
    tag= "konto"
)]
#[instrument]
pub async fn get_user(
    identity: Extension<Identity>,
    pool: Extension<PgPool>,
) -> Result<impl IntoResponse, ServiceError> {
    let Some(account) = storage::find_by_id(&pool, identity.account_id).await? else {
        return Err(ServiceError::NotFound);
    };

    Ok(Json(account.view()))
}
