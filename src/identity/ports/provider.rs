//! Port for the external auth/identity provider.
//!
//! The provider owns credential storage, password hashing, session issuance,
//! and reset-token bookkeeping. This crate only consumes the contract below;
//! hashing and token formats are opaque here.

use crate::identity::domain::{EmailAddress, SessionToken, UserId};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for auth provider operations.
pub type AuthProviderResult<T> = Result<T, AuthProviderError>;

/// Opaque password-reset token issued by the provider.
///
/// Sent to the user by email and consumed exactly once. Its `Display` is
/// redacted so tokens do not leak into logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResetToken(String);

impl ResetToken {
    /// Wraps a provider-issued token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the token as `str`, for embedding in the recovery email.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResetToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[reset-token]")
    }
}

/// External auth provider contract.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Registers credentials for a new user and returns the provider-issued
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::DuplicateEmail`] when the email is
    /// already registered, or [`AuthProviderError::PasswordRejected`] when
    /// the password fails the provider's policy.
    async fn create_user(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthProviderResult<UserId>;

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::InvalidCredentials`] for any unknown
    /// email or wrong password; callers cannot distinguish the two.
    async fn verify_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthProviderResult<SessionToken>;

    /// Resolves a session token to the signed-in user's identifier.
    ///
    /// Returns `None` for unknown or signed-out sessions.
    async fn session_user(&self, session: &SessionToken) -> AuthProviderResult<Option<UserId>>;

    /// Issues a single-use password-reset token for `user_id`.
    async fn generate_reset_token(&self, user_id: &UserId) -> AuthProviderResult<ResetToken>;

    /// Consumes a reset token, replacing the user's password.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::InvalidResetToken`] when the token does
    /// not match an outstanding token for `user_id`, or
    /// [`AuthProviderError::PasswordRejected`] for policy failures.
    async fn consume_reset_token(
        &self,
        user_id: &UserId,
        token: &ResetToken,
        new_password: &str,
    ) -> AuthProviderResult<()>;

    /// Replaces the user's password after verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::InvalidCredentials`] when the current
    /// password is wrong, or [`AuthProviderError::PasswordRejected`] for
    /// policy failures.
    async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> AuthProviderResult<()>;

    /// Closes a session. Signing out an already-closed session is a no-op.
    async fn sign_out(&self, session: &SessionToken) -> AuthProviderResult<()>;

    /// Removes the user's credentials and any open sessions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::UnknownUser`] when the provider has no
    /// record of `user_id`.
    async fn delete_user(&self, user_id: &UserId) -> AuthProviderResult<()>;
}

/// Errors returned by auth provider implementations.
#[derive(Debug, Clone, Error)]
pub enum AuthProviderError {
    /// The email is already registered.
    #[error("email already registered: {0}")]
    DuplicateEmail(EmailAddress),

    /// The password fails the provider's policy.
    #[error("password rejected: {0}")]
    PasswordRejected(String),

    /// The email/password pair does not match a registered user.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The reset token is unknown, expired, or already consumed.
    #[error("invalid or expired reset token")]
    InvalidResetToken,

    /// The provider has no record of the user.
    #[error("unknown user: {0}")]
    UnknownUser(UserId),

    /// Provider-side failure.
    #[error("auth provider error: {0}")]
    Provider(Arc<dyn std::error::Error + Send + Sync>),
}

impl AuthProviderError {
    /// Wraps a provider-side failure.
    pub fn provider(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Provider(Arc::new(err))
    }
}
