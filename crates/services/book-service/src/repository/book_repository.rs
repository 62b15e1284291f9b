//! Book repository implementation.

use async_trait::async_trait;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use super::entities::book::{self, ActiveModel, Entity as BookEntity};
use common::{AppError, AppResult};
use domain::{Book, NewBook};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Book repository trait for dependency injection.
///
/// Mutations report affected row counts; deciding what zero rows means is
/// left to the service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert a book and return it with its assigned id
    async fn create(&self, new_book: NewBook) -> AppResult<Book>;

    /// List all books ordered by id
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Find book by ID
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Check whether a book with this ID exists
    async fn exists(&self, id: i32) -> AppResult<bool>;

    /// Overwrite every field of a book; returns rows affected
    async fn update(&self, id: i32, new_book: NewBook) -> AppResult<u64>;

    /// Delete a book; returns rows affected
    async fn delete(&self, id: i32) -> AppResult<u64>;
}

/// Concrete implementation of BookRepository backed by SeaORM.
pub struct BookStore {
    db: DatabaseConnection,
}

impl BookStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for BookStore {
    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let active_model = ActiveModel {
            title: Set(new_book.title),
            author: Set(new_book.author),
            publication_year: Set(new_book.publication_year),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Book::from(model))
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        let models = BookEntity::find()
            .order_by_asc(book::Column::Id)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Book::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let result = BookEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Book::from))
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let count = BookEntity::find()
            .filter(book::Column::Id.eq(id))
            .count(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(count > 0)
    }

    async fn update(&self, id: i32, new_book: NewBook) -> AppResult<u64> {
        let result = BookEntity::update_many()
            .col_expr(book::Column::Title, Expr::value(new_book.title))
            .col_expr(book::Column::Author, Expr::value(new_book.author))
            .col_expr(
                book::Column::PublicationYear,
                Expr::value(new_book.publication_year),
            )
            .filter(book::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        let result = BookEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected)
    }
}
