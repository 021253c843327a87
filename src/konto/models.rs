//! Account records and their serialized views.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle state of an account. New registrations default to `pending`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Pending,
    Active,
    Disabled,
}

impl AccountStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Disabled => "disabled",
        }
    }

    /// Parse the wire form. Exact lowercase match only.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "active" => Some(Self::Active),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A full account row, password hash included. Never serialized as-is.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub status: AccountStatus,
    pub created_at: String,
    pub updated_at: String,
}

impl Account {
    /// Public projection of the account, without the password hash.
    #[must_use]
    pub fn view(&self) -> AccountView {
        AccountView {
            id: self.id.to_string(),
            username: self.username.clone(),
            status: self.status,
            created_at: self.created_at.clone(),
            updated_at: self.updated_at.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AccountView {
    pub id: String,
    pub username: String,
    pub status: AccountStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            status: AccountStatus::Active,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-02T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn default_status_is_pending() {
        assert_eq!(AccountStatus::default(), AccountStatus::Pending);
    }

    #[test]
    fn parse_accepts_exact_lowercase_only() {
        assert_eq!(AccountStatus::parse("pending"), Some(AccountStatus::Pending));
        assert_eq!(AccountStatus::parse("active"), Some(AccountStatus::Active));
        assert_eq!(
            AccountStatus::parse("disabled"),
            Some(AccountStatus::Disabled)
        );
        assert_eq!(AccountStatus::parse("Active"), None);
        assert_eq!(AccountStatus::parse("frozen"), None);
        assert_eq!(AccountStatus::parse(""), None);
    }

    #[test]
    fn display_round_trips_through_parse() {
        for status in [
            AccountStatus::Pending,
            AccountStatus::Active,
            AccountStatus::Disabled,
        ] {
            assert_eq!(AccountStatus::parse(&status.to_string()), Some(status));
        }
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&AccountStatus::Disabled).unwrap();
        assert_eq!(json, r#""disabled""#);
    }

    #[test]
    fn view_omits_the_password_hash() {
        let view = account().view();
        let json = serde_json::to_value(&view).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            keys,
            ["created_at", "id", "status", "updated_at", "username"]
        );
    }
}
