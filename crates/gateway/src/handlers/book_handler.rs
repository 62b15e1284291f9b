//! Book CRUD handlers, mounted under both `/books` and `/api/books`.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{Book, BookDraft};

use crate::extractors::BookId;
use crate::handlers::response::MessageResponse;
use crate::state::AppState;

/// Book payload; missing fields are reported as validation errors.
type BookBody = WithRejection<Json<BookDraft>, AppError>;

/// Envelope for the book list.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookListResponse {
    #[schema(example = "Books retrieved successfully")]
    pub message: String,
    pub data: Vec<Book>,
    pub total: usize,
}

impl From<Vec<Book>> for BookListResponse {
    fn from(books: Vec<Book>) -> Self {
        let message = if books.is_empty() {
            "No books found."
        } else {
            "Books retrieved successfully"
        };

        Self {
            message: message.to_string(),
            total: books.len(),
            data: books,
        }
    }
}

/// Create book routes
pub fn book_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/:id", get(get_book).put(update_book).delete(delete_book))
}

/// Create a book
#[utoipa::path(
    post,
    path = "/api/books",
    tag = "Books",
    request_body = BookDraft,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "One or more fields are invalid"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(draft), _): BookBody,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.book_service.create_book(draft).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// List all books
#[utoipa::path(
    get,
    path = "/api/books",
    tag = "Books",
    responses(
        (status = 200, description = "Every stored book", body = BookListResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<BookListResponse>> {
    let books = state.book_service.list_books().await?;
    Ok(Json(BookListResponse::from(books)))
}

/// Get a book by id
#[utoipa::path(
    get,
    path = "/api/books/{id}",
    tag = "Books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 400, description = "Invalid book ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<Book>> {
    let book = state.book_service.get_book(id).await?;
    Ok(Json(book))
}

/// Replace a book's fields
#[utoipa::path(
    put,
    path = "/api/books/{id}",
    tag = "Books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookDraft,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid book ID or fields"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    WithRejection(Json(draft), _): BookBody,
) -> AppResult<Json<Book>> {
    let book = state.book_service.update_book(id, draft).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    tag = "Books",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Invalid book ID"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Json<MessageResponse>> {
    state.book_service.delete_book(id).await?;
    Ok(Json(MessageResponse::new("Book deleted successfully")))
}
