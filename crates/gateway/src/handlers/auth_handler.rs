//! Login, logout and registration handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use common::AppResult;
use domain::UserResponse;

use crate::extractors::ValidatedJson;
use crate::handlers::response::found;
use crate::middleware::login_redirect;
use crate::state::AppState;

pub const LOGGED_OUT: &str = "You have been logged out.";

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Unique login name
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "librarian")]
    pub username: String,
    /// Plain-text password, stored only as an Argon2 hash
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
    /// Requested role; only `admin` grants anything other than `user`
    #[schema(example = "user")]
    pub role: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "librarian")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LoginPageQuery {
    /// Message shown after a redirect to the login page
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPageResponse {
    #[schema(example = "Please log in")]
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "Login successful")]
    pub message: String,
    #[schema(example = "/dashboard")]
    pub redirect: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    #[schema(example = "User registered successfully")]
    pub message: String,
    pub user: UserResponse,
}

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .route("/register", post(register))
}

/// Login page; sends logged-in users straight to the dashboard
#[utoipa::path(
    get,
    path = "/login",
    tag = "Authentication",
    params(LoginPageQuery),
    responses(
        (status = 200, description = "Login prompt", body = LoginPageResponse),
        (status = 302, description = "Already logged in, redirect to /dashboard")
    )
)]
pub async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginPageQuery>,
) -> Response {
    if state.sessions.load(&jar).is_some() {
        return found("/dashboard");
    }

    Json(LoginPageResponse {
        message: "Please log in".to_string(),
        error: query.error,
    })
    .into_response()
}

/// Verify credentials and set the session cookie
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = LoginResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Json<LoginResponse>)> {
    let session = state
        .auth_service
        .login(payload.username, payload.password)
        .await?;

    let jar = state.sessions.store(jar, &session)?;

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_string(),
            redirect: "/dashboard".to_string(),
        }),
    ))
}

/// Remove the session cookie
#[utoipa::path(
    get,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 302, description = "Session cleared, redirect to the login page")
    )
)]
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(session) = state.sessions.load(&jar) {
        tracing::info!(user_id = session.user_id, username = %session.username, "User logged out");
    }

    (state.sessions.clear(jar), login_redirect(LOGGED_OUT))
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = state
        .auth_service
        .register(payload.username, payload.password, payload.role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse::from(user),
        }),
    ))
}
