//! Dashboard and admin handlers.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use common::AppResult;
use domain::{UserResponse, UserRole};

use crate::middleware::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    #[schema(example = "Dashboard")]
    pub title: String,
    #[schema(example = "Welcome, librarian!")]
    pub welcome_message: String,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOverviewResponse {
    #[schema(example = "Admin Panel")]
    pub title: String,
    pub username: String,
    pub role: UserRole,
    pub total_users: usize,
}

/// Routes for any logged-in user
pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// Routes for admins
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(admin_overview))
        .route("/admin/users", get(list_users))
}

/// Personal dashboard
#[utoipa::path(
    get,
    path = "/dashboard",
    tag = "Dashboard",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Dashboard for the current user", body = DashboardResponse),
        (status = 302, description = "Not logged in, redirect to the login page")
    )
)]
pub async fn dashboard(
    Extension(CurrentSession(session)): Extension<CurrentSession>,
) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        title: "Dashboard".to_string(),
        welcome_message: format!("Welcome, {}!", session.username),
        username: session.username,
        role: session.role,
    })
}

/// Admin overview
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Admin overview", body = AdminOverviewResponse),
        (status = 302, description = "Not logged in, redirect to the login page"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn admin_overview(
    Extension(CurrentSession(session)): Extension<CurrentSession>,
    State(state): State<AppState>,
) -> AppResult<Json<AdminOverviewResponse>> {
    let users = state.auth_service.list_users().await?;

    Ok(Json(AdminOverviewResponse {
        title: "Admin Panel".to_string(),
        username: session.username,
        role: session.role,
        total_users: users.len(),
    }))
}

/// List all users (admin only)
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "List of all users", body = Vec<UserResponse>),
        (status = 302, description = "Not logged in, redirect to the login page"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.auth_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
