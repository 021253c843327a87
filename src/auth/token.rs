//! Bearer token issuance and verification.
//!
//! Tokens are HS256-signed with a shared secret and carry the account id as
//! their subject. Verification is offline; no database involved.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind, get_current_timestamp,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Tokens are valid for one hour from issuance.
pub const TOKEN_TTL_SECONDS: u64 = 3600;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

/// Signing and verification keys derived once from the shared secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token for the given account.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn issue(&self, account_id: Uuid) -> Result<String, TokenError> {
        let iat = get_current_timestamp();

        let claims = Claims {
            sub: account_id.to_string(),
            iat,
            exp: iat + TOKEN_TTL_SECONDS,
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Invalid)
    }

    /// Verify a token and return the account id it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Expired`] for a token past its `exp`, and
    /// [`TokenError::Invalid`] for anything else wrong with it.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let data =
            decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
                match err.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid,
                }
            })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Invalid)
    }
}

impl fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}
