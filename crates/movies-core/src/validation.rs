//! Validation utilities.

use crate::MoviesError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `MoviesError` on failure.
    fn validate_request(&self) -> Result<(), MoviesError> {
        self.validate().map_err(validation_errors_to_movies_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `MoviesError`.
///
/// Fields are listed in name order.
#[must_use]
pub fn validation_errors_to_movies_error(errors: ValidationErrors) -> MoviesError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), |m| m.to_string());
                format!("{}: {}", field, message)
            })
        })
        .collect();
    // field_errors() is backed by a HashMap
    messages.sort();

    MoviesError::Validation(messages.join("; "))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Rejects NaN and infinite values, which range checks let through.
    ///
    /// `validator` hands `Option<f64>` fields to custom functions unwrapped
    /// and by value.
    pub fn finite(value: f64) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::new("not_finite"));
        }
        Ok(())
    }
}
