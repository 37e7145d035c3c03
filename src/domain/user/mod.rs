//! User domain
//!
//! This module provides domain types and traits for managed users,
//! including the user entity, field validation, and the repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId, UserStatus};
pub use repository::UserRepository;
pub use validation::{
    validate_email, validate_first_name, validate_last_name, validate_phone_number,
    validate_user_payload, FieldFailure, UserValidationError, MAX_EMAIL_LENGTH,
};

#[cfg(test)]
pub use repository::mock::MockUserRepository;
