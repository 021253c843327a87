//! Error taxonomy shared by the account handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::auth::{password::PasswordError, token::TokenError};
use crate::konto::storage::StoreError;

/// Errors surfaced by the account handlers.
///
/// Every variant renders as `{ "error": kind, "message": text }`; the display
/// string is the caller-facing message, so internal causes never leak.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Missing payload")]
    MissingPayload,
    #[error("Username is required")]
    UsernameRequired,
    #[error("Username already in use")]
    UsernameTaken,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Your account is pending approval. Please wait for admin approval.")]
    AccountPending,
    #[error("Your account has been disabled. Contact support for assistance.")]
    AccountDisabled,
    #[error("User not found")]
    NotFound,
    #[error("Old password is incorrect.")]
    InvalidOldPassword,
    #[error("New password cannot be the same as the old password.")]
    SamePassword,
    #[error("Invalid status")]
    InvalidStatus,
    #[error("Invalid user id")]
    InvalidUserId,
    #[error("Server error")]
    Internal(anyhow::Error),
}

impl ServiceError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::MissingPayload
            | Self::UsernameRequired
            | Self::UsernameTaken
            | Self::InvalidCredentials
            | Self::InvalidOldPassword
            | Self::SamePassword
            | Self::InvalidStatus
            | Self::InvalidUserId => StatusCode::BAD_REQUEST,
            Self::AccountPending | Self::AccountDisabled => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::MissingPayload
            | Self::UsernameRequired
            | Self::InvalidCredentials
            | Self::InvalidOldPassword
            | Self::SamePassword
            | Self::InvalidStatus
            | Self::InvalidUserId => "validation",
            // kept at 400 for wire compatibility, but it is a conflict
            Self::UsernameTaken => "conflict",
            Self::AccountPending | Self::AccountDisabled => "forbidden",
            Self::NotFound => "not_found",
            Self::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        if let Self::Internal(err) = &self {
            error!("Internal error: {err:?}");
        }

        let body = Json(json!({ "error": self.kind(), "message": self.to_string() }));

        (self.status(), body).into_response()
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<PasswordError> for ServiceError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        Self::Internal(err.into())
    }
}
