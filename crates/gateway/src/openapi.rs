//! OpenAPI documentation.

use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::auth_handler::{
    LoginPageResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use crate::handlers::book_handler::BookListResponse;
use crate::handlers::dashboard_handler::{AdminOverviewResponse, DashboardResponse};
use crate::handlers::response::MessageResponse;
use domain::{Book, BookDraft, UserResponse, UserRole, DEFAULT_SESSION_COOKIE};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::auth_handler::login_page,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::auth_handler::register,
        crate::handlers::dashboard_handler::dashboard,
        crate::handlers::dashboard_handler::admin_overview,
        crate::handlers::dashboard_handler::list_users,
        crate::handlers::book_handler::create_book,
        crate::handlers::book_handler::list_books,
        crate::handlers::book_handler::get_book,
        crate::handlers::book_handler::update_book,
        crate::handlers::book_handler::delete_book,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            LoginPageResponse,
            RegisterRequest,
            RegisterResponse,
            UserResponse,
            UserRole,
            DashboardResponse,
            AdminOverviewResponse,
            Book,
            BookDraft,
            BookListResponse,
            MessageResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout and registration"),
        (name = "Dashboard", description = "Pages for logged-in users"),
        (name = "Admin", description = "Admin-only pages"),
        (name = "Books", description = "Book catalogue, also served under /books"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(DEFAULT_SESSION_COOKIE))),
            );
        }
    }
}
