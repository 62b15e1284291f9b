//! Repository layer for the book store.

pub mod entities;
mod book_repository;

pub use book_repository::{BookRepository, BookStore};

#[cfg(any(test, feature = "test-utils"))]
pub use book_repository::MockBookRepository;
