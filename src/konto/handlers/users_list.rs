use axum::{Json, extract::Extension, response::IntoResponse};
use sqlx::PgPool;
use tracing::instrument;

use crate::konto::{
    error::ServiceError,
    models::{Account, AccountView},
    storage,
};

#[utoipa::path(
    get,
    path= "/getusers",
    responses (
        (status = 200, description = "Every account, password hashes omitted", body = [AccountView]),
        (status = 500, description = "Server error"),
    ),
    tag= "konto"
)]
#[instrument]
pub async fn list_users(pool: Extension<PgPool>) -> Result<impl IntoResponse, ServiceError> {
    let accounts = storage::list_all(&pool).await?;
    let views: Vec<AccountView> = accounts.iter().map(Account::view).collect();

    Ok(Json(views))
}
