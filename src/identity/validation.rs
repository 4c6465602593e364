//! Field-level validation rules for account input.
//!
//! Password strength is the auth provider's policy; these rules only cover
//! what can be judged locally: email shape, required names, and the
//! confirmation pair matching.

use crate::identity::domain::EmailAddress;
use crate::validation::FieldError;

/// Field name used for email failures.
pub const EMAIL_FIELD: &str = "email";

/// Field name used for first-name failures.
pub const FIRST_NAME_FIELD: &str = "first_name";

/// Field name used for last-name failures.
pub const LAST_NAME_FIELD: &str = "last_name";

/// Field name used for password failures.
pub const PASSWORD_FIELD: &str = "password";

/// Field name used for confirmation-mismatch failures.
pub const PASSWORD_CONFIRMATION_FIELD: &str = "password_confirmation";

/// Validated registration fields produced by [`validate_registration_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRegistrationInput {
    /// The validated, normalised email address.
    pub email: EmailAddress,
    /// The trimmed given name.
    pub first_name: String,
    /// The trimmed family name.
    pub last_name: String,
}

/// Validates the email field.
///
/// # Errors
///
/// Returns a [`FieldError`] naming [`EMAIL_FIELD`] when the address is not
/// in a plausible shape.
pub fn validate_email(value: &str) -> Result<EmailAddress, FieldError> {
    EmailAddress::new(value).map_err(|err| FieldError::new(EMAIL_FIELD, err.to_string()))
}

/// Validates a required name field.
///
/// # Errors
///
/// Returns a [`FieldError`] naming `field` when the value is empty after
/// trimming.
pub fn validate_required_name(field: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::new(field, "must not be empty"));
    }
    Ok(trimmed.to_owned())
}

/// Validates a password and its confirmation as a pair.
///
/// # Errors
///
/// Returns [`FieldError`]s when the password is empty or the confirmation
/// does not match.
pub fn validate_password_pair(
    password: &str,
    confirmation: &str,
) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if password.is_empty() {
        errors.push(FieldError::new(PASSWORD_FIELD, "must not be empty"));
    }
    if password != confirmation {
        errors.push(FieldError::new(
            PASSWORD_CONFIRMATION_FIELD,
            "passwords do not match",
        ));
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates all registration fields, collecting every failure.
///
/// # Errors
///
/// Returns the full list of [`FieldError`]s when any field is invalid.
pub fn validate_registration_input(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: &str,
    password_confirmation: &str,
) -> Result<ValidatedRegistrationInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let email_value = match validate_email(email) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    };
    let first = match validate_required_name(FIRST_NAME_FIELD, first_name) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    };
    let last = match validate_required_name(LAST_NAME_FIELD, last_name) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    };
    if let Err(pair_errors) = validate_password_pair(password, password_confirmation) {
        errors.extend(pair_errors);
    }

    match (errors.is_empty(), email_value, first, last) {
        (true, Some(validated_email), Some(first_name_value), Some(last_name_value)) => {
            Ok(ValidatedRegistrationInput {
                email: validated_email,
                first_name: first_name_value,
                last_name: last_name_value,
            })
        }
        _ => Err(errors),
    }
}
