//! In-memory auth provider for identity tests.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::identity::{
    domain::{EmailAddress, SessionToken, UserId},
    ports::{AuthProvider, AuthProviderError, AuthProviderResult, ResetToken},
};

/// Minimum password length accepted by the in-memory policy.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Thread-safe in-memory auth provider.
///
/// Stores unsalted SHA-256 password digests, open sessions, and
/// outstanding single-use reset tokens. Suitable only for tests; a real
/// deployment delegates to an external identity service with proper password
/// hashing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuthProvider {
    state: Arc<RwLock<ProviderState>>,
}

#[derive(Debug, Default)]
struct ProviderState {
    credentials: HashMap<UserId, Credential>,
    email_index: HashMap<EmailAddress, UserId>,
    sessions: HashMap<SessionToken, UserId>,
    reset_tokens: HashMap<UserId, String>,
}

#[derive(Debug, Clone)]
struct Credential {
    email: EmailAddress,
    password_digest: [u8; 32],
}

impl InMemoryAuthProvider {
    /// Creates an empty in-memory provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open sessions, for test assertions.
    ///
    /// # Errors
    ///
    /// Returns [`AuthProviderError::Provider`] when the state lock is
    /// poisoned.
    pub fn open_sessions(&self) -> AuthProviderResult<usize> {
        let state = read_state(&self.state)?;
        Ok(state.sessions.len())
    }
}

fn digest_password(password: &str) -> [u8; 32] {
    Sha256::digest(password.as_bytes()).into()
}

fn check_password_policy(password: &str) -> AuthProviderResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthProviderError::PasswordRejected(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

fn read_state(
    state: &Arc<RwLock<ProviderState>>,
) -> AuthProviderResult<std::sync::RwLockReadGuard<'_, ProviderState>> {
    state
        .read()
        .map_err(|err| AuthProviderError::provider(std::io::Error::other(err.to_string())))
}

fn write_state(
    state: &Arc<RwLock<ProviderState>>,
) -> AuthProviderResult<std::sync::RwLockWriteGuard<'_, ProviderState>> {
    state
        .write()
        .map_err(|err| AuthProviderError::provider(std::io::Error::other(err.to_string())))
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn create_user(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthProviderResult<UserId> {
        check_password_policy(password)?;
        let mut state = write_state(&self.state)?;
        if state.email_index.contains_key(email) {
            return Err(AuthProviderError::DuplicateEmail(email.clone()));
        }

        let user_id = UserId::new(Uuid::new_v4().to_string())
            .map_err(AuthProviderError::provider)?;
        state.email_index.insert(email.clone(), user_id.clone());
        state.credentials.insert(
            user_id.clone(),
            Credential {
                email: email.clone(),
                password_digest: digest_password(password),
            },
        );
        Ok(user_id)
    }

    async fn verify_credentials(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> AuthProviderResult<SessionToken> {
        let mut state = write_state(&self.state)?;
        let user_id = state
            .email_index
            .get(email)
            .cloned()
            .ok_or(AuthProviderError::InvalidCredentials)?;
        let credential = state
            .credentials
            .get(&user_id)
            .ok_or(AuthProviderError::InvalidCredentials)?;
        if credential.password_digest != digest_password(password) {
            return Err(AuthProviderError::InvalidCredentials);
        }

        let session = SessionToken::new();
        state.sessions.insert(session.clone(), user_id);
        Ok(session)
    }

    async fn session_user(&self, session: &SessionToken) -> AuthProviderResult<Option<UserId>> {
        let state = read_state(&self.state)?;
        Ok(state.sessions.get(session).cloned())
    }

    async fn generate_reset_token(&self, user_id: &UserId) -> AuthProviderResult<ResetToken> {
        let mut state = write_state(&self.state)?;
        if !state.credentials.contains_key(user_id) {
            return Err(AuthProviderError::UnknownUser(user_id.clone()));
        }
        let token = Uuid::new_v4().to_string();
        state.reset_tokens.insert(user_id.clone(), token.clone());
        Ok(ResetToken::new(token))
    }

    async fn consume_reset_token(
        &self,
        user_id: &UserId,
        token: &ResetToken,
        new_password: &str,
    ) -> AuthProviderResult<()> {
        check_password_policy(new_password)?;
        let mut state = write_state(&self.state)?;
        let outstanding = state
            .reset_tokens
            .get(user_id)
            .ok_or(AuthProviderError::InvalidResetToken)?;
        if outstanding != token.as_str() {
            return Err(AuthProviderError::InvalidResetToken);
        }

        state.reset_tokens.remove(user_id);
        let credential = state
            .credentials
            .get_mut(user_id)
            .ok_or_else(|| AuthProviderError::UnknownUser(user_id.clone()))?;
        credential.password_digest = digest_password(new_password);
        Ok(())
    }

    async fn change_password(
        &self,
        user_id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> AuthProviderResult<()> {
        check_password_policy(new_password)?;
        let mut state = write_state(&self.state)?;
        let credential = state
            .credentials
            .get_mut(user_id)
            .ok_or_else(|| AuthProviderError::UnknownUser(user_id.clone()))?;
        if credential.password_digest != digest_password(current_password) {
            return Err(AuthProviderError::InvalidCredentials);
        }
        credential.password_digest = digest_password(new_password);
        Ok(())
    }

    async fn sign_out(&self, session: &SessionToken) -> AuthProviderResult<()> {
        let mut state = write_state(&self.state)?;
        state.sessions.remove(session);
        Ok(())
    }

    async fn delete_user(&self, user_id: &UserId) -> AuthProviderResult<()> {
        let mut state = write_state(&self.state)?;
        let credential = state
            .credentials
            .remove(user_id)
            .ok_or_else(|| AuthProviderError::UnknownUser(user_id.clone()))?;
        state.email_index.remove(&credential.email);
        state.reset_tokens.remove(user_id);
        state.sessions.retain(|_, signed_in| signed_in != user_id);
        Ok(())
    }
}
