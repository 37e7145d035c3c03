//! User validation utilities

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]{2,50}$").unwrap());

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9]{10,15}$").unwrap());

/// Maximum length for email addresses
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("First name is required")]
    FirstNameRequired,

    #[error("First name must be 2-50 characters and contain only letters")]
    FirstNameFormat,

    #[error("Last name is required")]
    LastNameRequired,

    #[error("Last name must be 2-50 characters and contain only letters")]
    LastNameFormat,

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email format")]
    EmailFormat,

    #[error("Email must not exceed 100 characters")]
    EmailTooLong,

    #[error("Phone number must be 10-15 digits")]
    PhoneNumberFormat,
}

/// A failed check attributed to a request field
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFailure {
    pub field: &'static str,
    pub error: UserValidationError,
}

/// Validate a first name
///
/// Rules:
/// - Required, must not be blank
/// - 2 to 50 characters, letters and spaces only
pub fn validate_first_name(first_name: Option<&str>) -> Result<(), UserValidationError> {
    let Some(value) = first_name else {
        return Err(UserValidationError::FirstNameRequired);
    };

    if value.trim().is_empty() {
        return Err(UserValidationError::FirstNameRequired);
    }

    if !NAME_PATTERN.is_match(value) {
        return Err(UserValidationError::FirstNameFormat);
    }

    Ok(())
}

/// Validate a last name
///
/// Rules:
/// - Required, must not be blank
/// - 2 to 50 characters, letters and spaces only
pub fn validate_last_name(last_name: Option<&str>) -> Result<(), UserValidationError> {
    let Some(value) = last_name else {
        return Err(UserValidationError::LastNameRequired);
    };

    if value.trim().is_empty() {
        return Err(UserValidationError::LastNameRequired);
    }

    if !NAME_PATTERN.is_match(value) {
        return Err(UserValidationError::LastNameFormat);
    }

    Ok(())
}

/// Validate an email address
///
/// Rules:
/// - Required, must not be blank
/// - Must look like local@domain.tld
/// - Maximum 100 characters
pub fn validate_email(email: Option<&str>) -> Result<(), UserValidationError> {
    let Some(value) = email else {
        return Err(UserValidationError::EmailRequired);
    };

    if value.trim().is_empty() {
        return Err(UserValidationError::EmailRequired);
    }

    if !EMAIL_PATTERN.is_match(value) {
        return Err(UserValidationError::EmailFormat);
    }

    if value.chars().count() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong);
    }

    Ok(())
}

/// Validate a phone number
///
/// Rules:
/// - Optional, absent is fine
/// - 10 to 15 digits when present, with an optional leading plus
pub fn validate_phone_number(phone_number: Option<&str>) -> Result<(), UserValidationError> {
    match phone_number {
        None => Ok(()),
        Some(value) if PHONE_PATTERN.is_match(value) => Ok(()),
        Some(_) => Err(UserValidationError::PhoneNumberFormat),
    }
}

/// Validate the writable user fields, collecting at most one failure per
/// field in request order: firstName, lastName, email, phoneNumber.
pub fn validate_user_payload(
    first_name: Option<&str>,
    last_name: Option<&str>,
    email: Option<&str>,
    phone_number: Option<&str>,
) -> Vec<FieldFailure> {
    let mut failures = Vec::new();

    if let Err(error) = validate_first_name(first_name) {
        failures.push(FieldFailure {
            field: "firstName",
            error,
        });
    }

    if let Err(error) = validate_last_name(last_name) {
        failures.push(FieldFailure {
            field: "lastName",
            error,
        });
    }

    if let Err(error) = validate_email(email) {
        failures.push(FieldFailure {
            field: "email",
            error,
        });
    }

    if let Err(error) = validate_phone_number(phone_number) {
        failures.push(FieldFailure {
            field: "phoneNumber",
            error,
        });
    }

    failures
}
