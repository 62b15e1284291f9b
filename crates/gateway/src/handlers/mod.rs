//! HTTP request handlers.

pub mod auth_handler;
pub mod book_handler;
pub mod dashboard_handler;
pub mod health_handler;
pub mod response;

pub use auth_handler::auth_routes;
pub use book_handler::book_routes;
pub use dashboard_handler::{admin_routes, dashboard_routes};
pub use health_handler::health_routes;
