//! Domain service for authentication and authorization.
//!
//! Covers credential verification, bearer token issuance, token resolution
//! and the active-user check applied to protected routes.
//!
//! Tokens are passthrough: the token for a user is the username itself, with
//! no signature and no expiry. A token is valid exactly when the username is
//! in the directory. This scheme provides no real security.

use serde::Serialize;
use thiserror::Error;

use crate::constants::auth;
use crate::services::directory::UserRecord;

/// Errors specific to authentication operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown username or wrong password. The two are indistinguishable.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Request carried no usable `Authorization: Bearer` header.
    #[error("Not authenticated")]
    MissingToken,

    /// Bearer token does not resolve to a directory entry.
    #[error("Invalid authentication credentials")]
    InvalidToken,

    /// Token resolved but the account is disabled.
    #[error("Inactive user")]
    InactiveUser,
}

impl AuthError {
    /// Stable machine-readable name, used as a log field and metric label.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::InactiveUser => "inactive_user",
        }
    }
}

/// Placeholder password transform.
///
/// Prepends a fixed public prefix. Stored directory secrets are produced with
/// exactly this function, so it must not be swapped for a real hash without
/// migrating the directory.
#[must_use]
pub fn transform_password(plaintext: &str) -> String {
    format!("{}{}", auth::PASSWORD_PREFIX, plaintext)
}

/// Bearer token as returned by `POST /token`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: &'static str,
}

/// Domain service trait for authentication.
///
/// All operations are synchronous reads over an immutable directory.
pub trait AuthService: Send + Sync {
    /// Returns `true` only when the user exists and the transformed password
    /// matches the stored secret.
    fn verify(&self, username: &str, password: &str) -> bool;

    /// Issues a token for a user that already passed [`AuthService::verify`].
    fn issue(&self, username: &str) -> AccessToken;

    /// Maps a presented token back to its user.
    fn resolve(&self, token: &str) -> Option<UserRecord>;

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails.
    fn login(&self, username: &str, password: &str) -> Result<AccessToken, AuthError> {
        if !self.verify(username, password) {
            return Err(AuthError::InvalidCredentials);
        }
        Ok(self.issue(username))
    }

    /// Access gate: resolves the token, then requires an active account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidToken`] when the token does not resolve and
    /// [`AuthError::InactiveUser`] when the resolved account is disabled.
    fn authorize(&self, token: &str) -> Result<UserRecord, AuthError> {
        let user = self.resolve(token).ok_or(AuthError::InvalidToken)?;

        if user.disabled {
            return Err(AuthError::InactiveUser);
        }

        Ok(user)
    }
}
