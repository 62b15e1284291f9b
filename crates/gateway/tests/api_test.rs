//! Integration tests for the HTTP API.
//!
//! The real services run over in-memory repositories, so no database is
//! needed. Mocks stand in where a test must prove a handler never ran.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;

use auth_service_lib::repository::UserRepository;
use auth_service_lib::service::MockAuthService;
use auth_service_lib::{AuthService, Authenticator, SessionTokens};
use book_service_lib::repository::{BookRepository, MockBookRepository};
use book_service_lib::{BookManager, BookService};
use common::{AppError, AppResult, SessionConfig};
use domain::{Book, NewBook, Session, User, UserRole};
use gateway_lib::config::{BookAccess, GatewayConfig};
use gateway_lib::routes::create_router;
use gateway_lib::session::SessionCookies;
use gateway_lib::state::AppState;

const SECRET: &str = "integration-test-secret-32-characters!";

// =============================================================================
// In-memory repositories
// =============================================================================

#[derive(Default)]
struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn create(
        &self,
        username: String,
        password_hash: String,
        role: UserRole,
    ) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::conflict("Username"));
        }

        let now = Utc::now();
        let user = User {
            id: users.len() as i32 + 1,
            username,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }
}

struct InMemoryBooks {
    books: Mutex<BTreeMap<i32, Book>>,
    next_id: AtomicI32,
}

impl Default for InMemoryBooks {
    fn default() -> Self {
        Self {
            books: Mutex::new(BTreeMap::new()),
            next_id: AtomicI32::new(1),
        }
    }
}

#[async_trait]
impl BookRepository for InMemoryBooks {
    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let book = new_book.with_id(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.books.lock().unwrap().insert(book.id, book.clone());
        Ok(book)
    }

    async fn list(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.books.lock().unwrap().get(&id).cloned())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.books.lock().unwrap().contains_key(&id))
    }

    async fn update(&self, id: i32, new_book: NewBook) -> AppResult<u64> {
        let mut books = self.books.lock().unwrap();
        match books.get_mut(&id) {
            Some(book) => {
                *book = new_book.with_id(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i32) -> AppResult<u64> {
        Ok(self.books.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn session_config() -> SessionConfig {
    SessionConfig {
        secret: SECRET.to_string(),
        ..SessionConfig::default()
    }
}

fn build_app(
    auth_service: Arc<dyn AuthService>,
    book_service: Arc<dyn BookService>,
    book_access: BookAccess,
) -> Router {
    let config = session_config();
    let sessions = SessionCookies::new(SessionTokens::new(&config.secret), &config);
    let state = AppState::new(
        auth_service,
        book_service,
        sessions,
        GatewayConfig { book_access },
    );
    create_router(state)
}

fn app(book_access: BookAccess) -> Router {
    build_app(
        Arc::new(Authenticator::new(Arc::new(InMemoryUsers::default()), 24, true)),
        Arc::new(BookManager::new(Arc::new(InMemoryBooks::default()))),
        book_access,
    )
}

/// Cookie header value for a freshly signed session.
fn session_cookie(role: UserRole) -> String {
    let session = Session {
        id: Default::default(),
        user_id: 1,
        username: "tester".to_string(),
        role,
        expires_at: Utc::now() + Duration::hours(1),
    };
    let token = SessionTokens::new(SECRET).encode(&session).unwrap();
    format!("session={}", token)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` part of the response's Set-Cookie header.
fn set_cookie_pair(response: &Response) -> String {
    let raw = response.headers()[header::SET_COOKIE].to_str().unwrap();
    raw.split(';').next().unwrap().to_string()
}

async fn register(app: &Router, username: &str, password: &str, role: Option<&str>) -> Response {
    send(
        app,
        json_request(
            "POST",
            "/register",
            json!({ "username": username, "password": password, "role": role }),
        ),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> Response {
    send(
        app,
        json_request(
            "POST",
            "/login",
            json!({ "username": username, "password": password }),
        ),
    )
    .await
}

// =============================================================================
// Books
// =============================================================================

#[tokio::test]
async fn test_dune_scenario() {
    let app = app(BookAccess::Public);

    let created = send(
        &app,
        json_request(
            "POST",
            "/api/books",
            json!({ "title": "Dune", "author": "Frank Herbert", "publication_year": 1965 }),
        ),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let created = body_json(created).await;
    let id = created["id"].as_i64().unwrap();
    assert!(id > 0);

    let fetched = send(&app, get(&format!("/api/books/{}", id), None)).await;
    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(body_json(fetched).await, created);

    let updated = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/books/{}", id),
            json!({ "title": "Dune2", "author": "Frank Herbert", "publication_year": 1966 }),
        ),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);
    let updated = body_json(updated).await;
    assert_eq!(updated["id"], id);
    assert_eq!(updated["title"], "Dune2");
    assert_eq!(updated["publication_year"], 1966);

    let refetched = body_json(send(&app, get(&format!("/api/books/{}", id), None)).await).await;
    assert_eq!(refetched["title"], "Dune2");

    let listed = body_json(send(&app, get("/api/books", None)).await).await;
    assert_eq!(listed["message"], "Books retrieved successfully");
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["data"][0]["title"], "Dune2");

    let deleted = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/books/{}", id))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await["message"], "Book deleted successfully");

    let gone = send(&app, get(&format!("/api/books/{}", id), None)).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let empty = body_json(send(&app, get("/books", None)).await).await;
    assert_eq!(empty["message"], "No books found.");
    assert_eq!(empty["total"], 0);
    assert_eq!(empty["data"], json!([]));
}

#[tokio::test]
async fn test_create_book_reports_every_invalid_field() {
    let app = app(BookAccess::Public);

    let response = send(&app, json_request("POST", "/books", json!({}))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    let fields = &body["error"]["fields"];
    assert_eq!(fields["title"], "Title is required");
    assert_eq!(fields["author"], "Author is required");
    assert_eq!(fields["publication_year"], "Publication year is required");
}

#[tokio::test]
async fn test_invalid_book_id_is_bad_request() {
    let app = app(BookAccess::Public);

    for uri in ["/api/books/abc", "/api/books/0", "/api/books/-4"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body_json(response).await["error"]["message"], "Invalid book ID");
    }
}

#[tokio::test]
async fn test_unknown_book_is_not_found_for_every_operation() {
    let app = app(BookAccess::Public);

    let fetched = send(&app, get("/api/books/404", None)).await;
    let updated = send(
        &app,
        json_request(
            "PUT",
            "/api/books/404",
            json!({ "title": "Dune", "author": "Herbert", "publication_year": 1965 }),
        ),
    )
    .await;
    let deleted = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/api/books/404")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    assert_eq!(updated.status(), StatusCode::NOT_FOUND);
    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app(BookAccess::Public);

    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_storage_failure_is_internal_error() {
    let mut repo = MockBookRepository::new();
    repo.expect_list()
        .returning(|| Err(AppError::internal("connection reset")));

    let app = build_app(
        Arc::new(MockAuthService::new()),
        Arc::new(BookManager::new(Arc::new(repo))),
        BookAccess::Public,
    );

    let response = send(&app, get("/api/books", None)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "An internal error occurred");
}

#[tokio::test]
async fn test_authenticated_books_redirect_without_running_handler() {
    let mut repo = MockBookRepository::new();
    repo.expect_list().never();

    let app = build_app(
        Arc::new(MockAuthService::new()),
        Arc::new(BookManager::new(Arc::new(repo))),
        BookAccess::Authenticated,
    );

    let response = send(&app, get("/books", None)).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/login?error=You%20need%20to%20login%20first."
    );
}

#[tokio::test]
async fn test_admin_books_forbidden_for_user_role() {
    let app = app(BookAccess::Admin);

    let user = session_cookie(UserRole::User);
    let admin = session_cookie(UserRole::Admin);

    let forbidden = send(&app, get("/api/books", Some(&user))).await;
    let allowed = send(&app, get("/api/books", Some(&admin))).await;

    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(allowed.status(), StatusCode::OK);
}

// =============================================================================
// Sessions and roles
// =============================================================================

#[tokio::test]
async fn test_protected_route_without_session_redirects() {
    let mut auth = MockAuthService::new();
    auth.expect_list_users().never();

    let app = build_app(
        Arc::new(auth),
        Arc::new(BookManager::new(Arc::new(InMemoryBooks::default()))),
        BookAccess::Public,
    );

    for uri in ["/dashboard", "/admin", "/admin/users"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::FOUND, "{}", uri);
        assert_eq!(
            location(&response),
            "/login?error=You%20need%20to%20login%20first."
        );
    }
}

#[tokio::test]
async fn test_tampered_cookie_is_treated_as_no_session() {
    let app = app(BookAccess::Public);
    let mut cookie = session_cookie(UserRole::Admin);
    cookie.push('x');

    let response = send(&app, get("/dashboard", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_admin_route_forbidden_for_user_allowed_for_admin() {
    let app = app(BookAccess::Public);

    assert_eq!(
        register(&app, "bob", "builder", None).await.status(),
        StatusCode::CREATED
    );
    assert_eq!(
        register(&app, "root", "toor", Some("admin")).await.status(),
        StatusCode::CREATED
    );

    let user_cookie = set_cookie_pair(&login(&app, "bob", "builder").await);
    let admin_cookie = set_cookie_pair(&login(&app, "root", "toor").await);

    let forbidden = send(&app, get("/admin", Some(&user_cookie))).await;
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    assert_eq!(
        body_json(forbidden).await["error"]["message"],
        "You do not have sufficient permissions to access this page."
    );

    let overview = send(&app, get("/admin", Some(&admin_cookie))).await;
    assert_eq!(overview.status(), StatusCode::OK);
    let overview = body_json(overview).await;
    assert_eq!(overview["username"], "root");
    assert_eq!(overview["role"], "admin");
    assert_eq!(overview["total_users"], 2);

    let users = send(&app, get("/admin/users", Some(&admin_cookie))).await;
    assert_eq!(users.status(), StatusCode::OK);
    let users = body_json(users).await;
    assert_eq!(users.as_array().map(Vec::len), Some(2));
    assert!(users[0].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_cookie_opens_dashboard() {
    let app = app(BookAccess::Public);
    register(&app, "alice", "wonderland", None).await;

    let response = login(&app, "alice", "wonderland").await;
    assert_eq!(response.status(), StatusCode::OK);

    let raw_cookie = response.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(raw_cookie.contains("HttpOnly"));
    assert!(raw_cookie.contains("SameSite=Lax"));

    let cookie = set_cookie_pair(&response);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["redirect"], "/dashboard");

    let dashboard = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(dashboard.status(), StatusCode::OK);
    let dashboard = body_json(dashboard).await;
    assert_eq!(dashboard["username"], "alice");
    assert_eq!(dashboard["role"], "user");

    let login_page = send(&app, get("/login", Some(&cookie))).await;
    assert_eq!(login_page.status(), StatusCode::FOUND);
    assert_eq!(location(&login_page), "/dashboard");
}

#[tokio::test]
async fn test_login_failures_are_identical() {
    let app = app(BookAccess::Public);
    register(&app, "alice", "wonderland", None).await;

    let wrong_password = login(&app, "alice", "looking-glass").await;
    let unknown_user = login(&app, "mallory", "looking-glass").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());

    let wrong_password = body_json(wrong_password).await;
    let unknown_user = body_json(unknown_user).await;
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(
        wrong_password["error"]["message"],
        "Invalid username or password"
    );
}

#[tokio::test]
async fn test_login_empty_fields_rejected() {
    let app = app(BookAccess::Public);

    let response = login(&app, "", "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["fields"]["username"], "Username is required");
    assert_eq!(body["error"]["fields"]["password"], "Password is required");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = app(BookAccess::Public);

    let first = register(&app, "alice", "wonderland", None).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await;
    assert_eq!(first["message"], "User registered successfully");
    assert_eq!(first["user"]["role"], "user");
    assert!(first["user"].get("password_hash").is_none());

    let second = register(&app, "alice", "another", Some("admin")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(second).await["error"]["message"],
        "Username already exists"
    );

    // The original account keeps its password and role.
    let original = login(&app, "alice", "wonderland").await;
    assert_eq!(original.status(), StatusCode::OK);
    let cookie = set_cookie_pair(&original);
    let dashboard = body_json(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert_eq!(dashboard["username"], "alice");
    assert_eq!(dashboard["role"], "user");

    let rejected = login(&app, "alice", "another").await;
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie_and_redirects() {
    let app = app(BookAccess::Public);
    let cookie = session_cookie(UserRole::User);

    let response = send(&app, get("/logout", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        location(&response),
        "/login?error=You%20have%20been%20logged%20out."
    );
    assert!(set_cookie_pair(&response).starts_with("session="));

    // Logging out twice is harmless.
    let again = send(&app, get("/logout", None)).await;
    assert_eq!(again.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_login_page_echoes_error() {
    let app = app(BookAccess::Public);

    let response = send(&app, get("/login?error=Session%20expired", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["error"], "Session expired");
}

#[tokio::test]
async fn test_health_without_database() {
    let app = app(BookAccess::Public);

    let response = send(&app, get("/health", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["services"]["database"]["status"],
        "not_configured"
    );
}
