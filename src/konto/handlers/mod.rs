pub mod health;
pub use self::health::health;

pub mod user_register;
pub use self::user_register::register;

pub mod user_login;
pub use self::user_login::login;

pub mod user_get;
pub use self::user_get::get_user;

pub mod user_update;
pub use self::user_update::update_user;

pub mod users_list;
pub use self::users_list::list_users;

pub mod status_update;
pub use self::status_update::update_status;

// common bits for the handlers
use crate::konto::models::AccountStatus;
use serde::Serialize;
use utoipa::ToSchema;

/// Standard `{ message, status }` success body.
#[derive(ToSchema, Serialize, Debug)]
pub struct StatusMessage {
    pub message: String,
    pub status: AccountStatus,
}

/// Trim an optional field and treat whitespace-only input as absent.
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
