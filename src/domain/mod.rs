//! Domain layer - Core business logic and entities

pub mod error;
pub mod page;
pub mod user;

pub use error::DomainError;
pub use page::{Page, PageRequest};
pub use user::{
    validate_email, validate_first_name, validate_last_name, validate_phone_number,
    validate_user_payload, FieldFailure, NewUser, User, UserId, UserRepository, UserStatus,
    UserValidationError,
};
