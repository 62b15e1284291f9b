//! Book service - CRUD use cases over the book store.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use common::{AppError, AppResult, OptionExt};
use domain::{Book, BookDraft};

use crate::repository::BookRepository;

/// Book service trait for dependency injection.
#[async_trait]
pub trait BookService: Send + Sync {
    /// Validate and persist a new book
    async fn create_book(&self, draft: BookDraft) -> AppResult<Book>;

    /// List all books (empty when there are none)
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    /// Get a book by ID
    async fn get_book(&self, id: i32) -> AppResult<Book>;

    /// Validate and overwrite an existing book
    async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book>;

    /// Delete a book by ID
    async fn delete_book(&self, id: i32) -> AppResult<()>;
}

/// Concrete implementation of BookService using a repository.
pub struct BookManager {
    repo: Arc<dyn BookRepository>,
}

impl BookManager {
    /// Create new book service instance with repository
    pub fn new(repo: Arc<dyn BookRepository>) -> Self {
        Self { repo }
    }
}

fn ensure_valid_id(id: i32) -> AppResult<()> {
    if id <= 0 {
        return Err(AppError::validation("Invalid book ID"));
    }
    Ok(())
}

#[async_trait]
impl BookService for BookManager {
    async fn create_book(&self, draft: BookDraft) -> AppResult<Book> {
        let new_book = draft.validate()?;
        let book = self.repo.create(new_book).await?;
        info!(book_id = book.id, "Book created");
        Ok(book)
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repo.list().await
    }

    async fn get_book(&self, id: i32) -> AppResult<Book> {
        ensure_valid_id(id)?;
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn update_book(&self, id: i32, draft: BookDraft) -> AppResult<Book> {
        ensure_valid_id(id)?;
        let new_book = draft.validate()?;

        if !self.repo.exists(id).await? {
            return Err(AppError::NotFound);
        }

        // Deleted between the check and the write.
        if self.repo.update(id, new_book.clone()).await? == 0 {
            return Err(AppError::NotFound);
        }

        info!(book_id = id, "Book updated");
        Ok(new_book.with_id(id))
    }

    async fn delete_book(&self, id: i32) -> AppResult<()> {
        ensure_valid_id(id)?;

        if self.repo.delete(id).await? == 0 {
            return Err(AppError::NotFound);
        }

        info!(book_id = id, "Book deleted");
        Ok(())
    }
}
