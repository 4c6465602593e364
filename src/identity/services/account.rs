//! Service layer for session resolution and account lifecycle.
//!
//! [`AccountService`] is the identity/session adapter: it maps the auth
//! provider's session tokens to the local [`User`] record the task
//! subsystem's ownership checks run against, and orchestrates registration,
//! sign-in, password change and recovery, and account deletion. Account
//! deletion runs its steps in dependency order: the session is signed out,
//! then every owned task is removed, then the user record, and finally the
//! provider's credentials.

use crate::identity::{
    domain::{SessionToken, User, UserId},
    ports::{
        AuthProvider, AuthProviderError, EmailMessage, Mailer, MailerError, ResetToken,
        UserRepository, UserRepositoryError,
    },
    validation::{
        validate_email, validate_password_pair, validate_registration_input,
        ValidatedRegistrationInput, EMAIL_FIELD, PASSWORD_FIELD,
    },
};
use crate::task::{
    ports::TaskRepository,
    services::{TaskLifecycleError, TaskLifecycleService},
};
use crate::validation::FieldError;
use minijinja::{context, Environment};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Subject line of the password-recovery email.
const RECOVERY_EMAIL_SUBJECT: &str = "Pensum - Password recovery";

/// Body template of the password-recovery email.
const RECOVERY_EMAIL_TEMPLATE: &str = "\
Hello {{ first_name }},

A password reset was requested for your Pensum account.
Use this token to choose a new password:

    {{ token }}

If you did not request a reset, ignore this message.
";

/// Request payload for registering a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    email: String,
    first_name: String,
    last_name: String,
    password: String,
    password_confirmation: String,
}

impl RegisterRequest {
    /// Creates a registration request.
    #[must_use]
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password: password.into(),
            password_confirmation: password_confirmation.into(),
        }
    }
}

/// Service-level errors for account operations.
#[derive(Debug, Error)]
pub enum AccountError {
    /// One or more input fields failed validation. Recoverable: re-render
    /// the form with the messages attached to their fields.
    #[error("invalid account input: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// No authenticated session was presented.
    #[error("no authenticated session")]
    Unauthenticated,

    /// The session references a user no longer in storage, e.g. deleted
    /// concurrently.
    #[error("session user no longer exists: {0}")]
    UnknownUser(UserId),

    /// Auth provider operation failed.
    #[error(transparent)]
    Provider(#[from] AuthProviderError),

    /// User-record persistence failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// Email delivery failed. Not retried here.
    #[error(transparent)]
    Mail(#[from] MailerError),

    /// Task cascade during account deletion failed.
    #[error(transparent)]
    Tasks(#[from] TaskLifecycleError),

    /// Recovery-email template rendering failed.
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Result type for account service operations.
pub type AccountResult<T> = Result<T, AccountError>;

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Account lifecycle orchestration service.
#[derive(Clone)]
pub struct AccountService<U, A, M, R, C>
where
    U: UserRepository,
    A: AuthProvider,
    M: Mailer,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    auth: Arc<A>,
    mailer: Arc<M>,
    tasks: TaskLifecycleService<R, C>,
}

impl<U, A, M, R, C> AccountService<U, A, M, R, C>
where
    U: UserRepository,
    A: AuthProvider,
    M: Mailer,
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new account service.
    #[must_use]
    pub const fn new(
        users: Arc<U>,
        auth: Arc<A>,
        mailer: Arc<M>,
        tasks: TaskLifecycleService<R, C>,
    ) -> Self {
        Self {
            users,
            auth,
            mailer,
            tasks,
        }
    }

    /// Resolves the acting user from a session token.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Unauthenticated`] when no session is
    /// presented or the token matches no open session, and
    /// [`AccountError::UnknownUser`] when the session's user has been
    /// removed from storage.
    pub async fn current_user(&self, session: Option<&SessionToken>) -> AccountResult<User> {
        let token = session.ok_or(AccountError::Unauthenticated)?;
        let user_id = self
            .auth
            .session_user(token)
            .await?
            .ok_or(AccountError::Unauthenticated)?;
        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or(AccountError::UnknownUser(user_id))?;
        Ok(user)
    }

    /// Registers a new account and stores its local user record.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for invalid input, a duplicate
    /// email, or a provider-rejected password; other provider or storage
    /// failures propagate as dependency errors.
    pub async fn register(&self, request: RegisterRequest) -> AccountResult<User> {
        let ValidatedRegistrationInput {
            email,
            first_name,
            last_name,
        } = validate_registration_input(
            &request.email,
            &request.first_name,
            &request.last_name,
            &request.password,
            &request.password_confirmation,
        )
        .map_err(AccountError::Validation)?;

        let user_id = self
            .auth
            .create_user(&email, &request.password)
            .await
            .map_err(provider_error_to_field_errors)?;

        let user = User::new(user_id, email, first_name, last_name);
        if let Err(err) = self.users.store(&user).await {
            // Remove the provider credentials again so a failed registration
            // leaves nothing behind that no local record points at.
            drop(self.auth.delete_user(user.id()).await);
            return Err(err.into());
        }
        Ok(user)
    }

    /// Verifies credentials and opens a session.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for a malformed email and
    /// [`AuthProviderError::InvalidCredentials`] (via
    /// [`AccountError::Provider`]) for any unknown email or wrong password.
    pub async fn sign_in(&self, email: &str, password: &str) -> AccountResult<SessionToken> {
        let address =
            validate_email(email).map_err(|err| AccountError::Validation(vec![err]))?;
        let session = self.auth.verify_credentials(&address, password).await?;
        Ok(session)
    }

    /// Closes a session. Signing out twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Provider`] when the provider fails.
    pub async fn sign_out(&self, session: &SessionToken) -> AccountResult<()> {
        self.auth.sign_out(session).await?;
        Ok(())
    }

    /// Replaces the signed-in user's password and closes the session.
    ///
    /// The sign-out forces a fresh login with the new password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for a mismatched confirmation or
    /// provider-rejected password, and
    /// [`AuthProviderError::InvalidCredentials`] (via
    /// [`AccountError::Provider`]) for a wrong current password.
    pub async fn change_password(
        &self,
        session: &SessionToken,
        current_password: &str,
        new_password: &str,
        password_confirmation: &str,
    ) -> AccountResult<()> {
        validate_password_pair(new_password, password_confirmation)
            .map_err(AccountError::Validation)?;
        let user = self.current_user(Some(session)).await?;
        self.auth
            .change_password(user.id(), current_password, new_password)
            .await
            .map_err(provider_error_to_field_errors)?;
        self.auth.sign_out(session).await?;
        Ok(())
    }

    /// Issues a password-reset token and emails it to the account address.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] when no account matches the
    /// email, and [`AccountError::Mail`] when delivery fails (the token
    /// remains outstanding; the user may retry).
    pub async fn forgot_password(&self, email: &str) -> AccountResult<()> {
        let address =
            validate_email(email).map_err(|err| AccountError::Validation(vec![err]))?;
        let user = self
            .users
            .find_by_email(&address)
            .await?
            .ok_or_else(|| {
                AccountError::Validation(vec![FieldError::new(
                    EMAIL_FIELD,
                    "no account with this email",
                )])
            })?;

        let token = self.auth.generate_reset_token(user.id()).await?;
        let body = render_recovery_email(&user, &token)?;
        let message = EmailMessage::new(
            [user.email().clone()],
            RECOVERY_EMAIL_SUBJECT,
            body,
        );
        self.mailer.send(&message).await?;
        Ok(())
    }

    /// Consumes a reset token, replacing the account password.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Validation`] for a mismatched confirmation,
    /// an unknown email, or a provider-rejected password, and
    /// [`AuthProviderError::InvalidResetToken`] (via
    /// [`AccountError::Provider`]) for a stale or foreign token.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &ResetToken,
        new_password: &str,
        password_confirmation: &str,
    ) -> AccountResult<()> {
        validate_password_pair(new_password, password_confirmation)
            .map_err(AccountError::Validation)?;
        let address =
            validate_email(email).map_err(|err| AccountError::Validation(vec![err]))?;
        let user = self
            .users
            .find_by_email(&address)
            .await?
            .ok_or_else(|| {
                AccountError::Validation(vec![FieldError::new(
                    EMAIL_FIELD,
                    "no account with this email",
                )])
            })?;

        self.auth
            .consume_reset_token(user.id(), token, new_password)
            .await
            .map_err(provider_error_to_field_errors)?;
        Ok(())
    }

    /// Deletes the signed-in user's account.
    ///
    /// Order matters: the session is closed first, then every owned task is
    /// removed (the user row is the tasks' foreign-key target and must
    /// outlive the cascade), then the user record, and finally the
    /// provider's credentials.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::Unauthenticated`] or
    /// [`AccountError::UnknownUser`] when the session does not resolve, and
    /// dependency errors when any cleanup step fails.
    pub async fn delete_account(&self, session: &SessionToken) -> AccountResult<()> {
        let user = self.current_user(Some(session)).await?;
        self.auth.sign_out(session).await?;
        self.tasks.delete_all_for_user(user.id()).await?;
        self.users.delete(user.id()).await?;
        self.auth.delete_user(user.id()).await?;
        Ok(())
    }
}

/// Maps recoverable provider failures onto field errors, leaving the rest
/// untouched.
fn provider_error_to_field_errors(err: AuthProviderError) -> AccountError {
    match err {
        AuthProviderError::DuplicateEmail(email) => AccountError::Validation(vec![
            FieldError::new(EMAIL_FIELD, format!("already registered: {email}")),
        ]),
        AuthProviderError::PasswordRejected(reason) => {
            AccountError::Validation(vec![FieldError::new(PASSWORD_FIELD, reason)])
        }
        other => AccountError::Provider(other),
    }
}

fn render_recovery_email(user: &User, token: &ResetToken) -> Result<String, minijinja::Error> {
    let env = Environment::new();
    env.render_str(
        RECOVERY_EMAIL_TEMPLATE,
        context! {
            first_name => user.first_name(),
            token => token.as_str(),
        },
    )
}
