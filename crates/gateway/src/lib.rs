//! HTTP gateway for the bookshelf service.
//!
//! Owns the routes, the session cookie and the access-control middleware.
//! Business rules live in the auth and book service crates.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use auth_service_lib::{AuthServiceConfig, Authenticator, SessionTokens, UserStore};
use book_service_lib::{BookManager, BookStore};
use common::DatabaseConfig;
use database::Database;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::session::SessionCookies;
use crate::state::AppState;

/// Connect to the database, wire the services and serve HTTP until shutdown.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = GatewayConfig::from_env()?;
    let auth_config = AuthServiceConfig::from_env()?;
    let database = Database::connect(&DatabaseConfig::from_env()).await?;

    let state = build_state(database, auth_config, config);
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Bookshelf listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the application state over a connected database.
pub fn build_state(
    database: Database,
    auth_config: AuthServiceConfig,
    config: GatewayConfig,
) -> AppState {
    let users = Arc::new(UserStore::new(database.get_connection()));
    let books = Arc::new(BookStore::new(database.get_connection()));

    let auth_service = Arc::new(Authenticator::new(
        users,
        auth_config.session.ttl_hours,
        auth_config.allow_admin_registration,
    ));
    let book_service = Arc::new(BookManager::new(books));

    let tokens = SessionTokens::new(&auth_config.session.secret);
    let sessions = SessionCookies::new(tokens, &auth_config.session);

    info!(book_access = ?config.book_access, "Services initialized");

    AppState::new(auth_service, book_service, sessions, config).with_database(database)
}
