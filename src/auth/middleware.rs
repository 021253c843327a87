//! Bearer token gate for self-service routes.

use axum::{
    extract::{Extension, Request},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::auth::token::TokenKeys;

/// Account identity attached to the request once the bearer token verifies.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub account_id: Uuid,
}

/// Reject requests without a valid bearer token.
///
/// On success the request gains an [`Identity`] extension for handlers
/// downstream.
///
/// # Errors
///
/// Returns a `401` JSON response when the header is missing, malformed, or
/// carries a token that does not verify.
pub async fn require_bearer(
    keys: Extension<Arc<TokenKeys>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let identity = authenticate(&keys, header)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

fn authenticate(keys: &TokenKeys, header: Option<&str>) -> Result<Identity, Response> {
    let Some(header) = header else {
        return Err(unauthorized("unauthorized", "Authentication required"));
    };

    let Some(token) = header.strip_prefix("Bearer ") else {
        return Err(unauthorized(
            "unauthorized",
            "Invalid authorization header format",
        ));
    };

    match keys.verify(token) {
        Ok(account_id) => Ok(Identity { account_id }),
        Err(err) => {
            debug!("Rejected bearer token: {err}");

            Err(unauthorized("invalid_token", "Invalid or expired token"))
        }
    }
}

fn unauthorized(error: &str, message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": error, "message": message })),
    )
        .into_response()
}
