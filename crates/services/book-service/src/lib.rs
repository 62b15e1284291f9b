//! Book Service Library
//!
//! CRUD over the books table with aggregate field validation.

pub mod repository;
pub mod service;

pub use repository::{BookRepository, BookStore};
pub use service::{BookManager, BookService};
