//! Route configuration.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::BookAccess;
use crate::handlers::{admin_routes, auth_routes, book_routes, dashboard_routes, health_routes};
use crate::middleware::{require_auth, require_role, RoleGate};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Login, logout and registration (no auth)
        .merge(auth_routes())
        // Any logged-in user
        .merge(authenticated(dashboard_routes(), &state))
        // Admins only
        .merge(admin_only(admin_routes(), &state))
        // Books, guarded per deployment
        .nest("/books", guard_books(book_routes(), &state))
        .nest("/api/books", guard_books(book_routes(), &state))
        .with_state(state)
}

fn authenticated(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    routes.route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
}

// Layers run outside-in, so the role gate is added first and runs second.
fn admin_only(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    let routes = routes.route_layer(middleware::from_fn_with_state(
        RoleGate::admin_only(),
        require_role,
    ));
    authenticated(routes, state)
}

fn guard_books(routes: Router<AppState>, state: &AppState) -> Router<AppState> {
    match state.config.book_access {
        BookAccess::Public => routes,
        BookAccess::Authenticated => authenticated(routes, state),
        BookAccess::Admin => admin_only(routes, state),
    }
}
