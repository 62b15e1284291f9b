//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.

pub mod book;
pub mod constants;
pub mod error;
pub mod password;
pub mod session;
pub mod user;

pub use book::{Book, BookDraft, NewBook};
pub use constants::*;
pub use error::{DomainError, DomainResult, FieldErrors};
pub use password::Password;
pub use session::Session;
pub use user::{User, UserResponse, UserRole};
