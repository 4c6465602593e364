//! Field-level validation rules for task input.
//!
//! Each rule is a pure function that validates one input field and reports
//! failures as [`FieldError`]s attributed to that field. [`validate_task_input`]
//! runs every rule, collecting all failures so a caller can surface the
//! complete set of problems in one response, and returns the validated domain
//! scalars on success.

use crate::task::domain::{DetailedDescription, ShortDescription};
use crate::validation::FieldError;

/// Field name used for short-description failures.
pub const SHORT_DESCRIPTION_FIELD: &str = "short_description";

/// Field name used for detailed-description failures.
pub const DETAILED_DESCRIPTION_FIELD: &str = "detailed_description";

/// Validated task input fields produced by [`validate_task_input`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTaskInput {
    /// The validated one-line summary.
    pub short_description: ShortDescription,
    /// The validated body, if one was supplied.
    pub detailed_description: Option<DetailedDescription>,
}

/// Validates the short description field.
///
/// # Errors
///
/// Returns a [`FieldError`] naming [`SHORT_DESCRIPTION_FIELD`] when the value
/// is empty or exceeds the length limit.
pub fn validate_short_description(value: &str) -> Result<ShortDescription, FieldError> {
    ShortDescription::new(value)
        .map_err(|err| FieldError::new(SHORT_DESCRIPTION_FIELD, err.to_string()))
}

/// Validates the optional detailed description field.
///
/// # Errors
///
/// Returns a [`FieldError`] naming [`DETAILED_DESCRIPTION_FIELD`] when the
/// value exceeds the length limit.
pub fn validate_detailed_description(
    value: Option<&str>,
) -> Result<Option<DetailedDescription>, FieldError> {
    value
        .map(|raw| {
            DetailedDescription::new(raw)
                .map_err(|err| FieldError::new(DETAILED_DESCRIPTION_FIELD, err.to_string()))
        })
        .transpose()
}

/// Validates all task input fields, collecting every failure.
///
/// # Errors
///
/// Returns the full list of [`FieldError`]s when any field is invalid.
pub fn validate_task_input(
    short_description: &str,
    detailed_description: Option<&str>,
) -> Result<ValidatedTaskInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let short = match validate_short_description(short_description) {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    };
    let detailed = match validate_detailed_description(detailed_description) {
        Ok(value) => value,
        Err(err) => {
            errors.push(err);
            None
        }
    };

    match (errors.is_empty(), short) {
        (true, Some(short_description)) => Ok(ValidatedTaskInput {
            short_description,
            detailed_description: detailed,
        }),
        _ => Err(errors),
    }
}
