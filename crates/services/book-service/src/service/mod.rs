//! Book service business logic.

mod book_service;

pub use book_service::{BookManager, BookService};
