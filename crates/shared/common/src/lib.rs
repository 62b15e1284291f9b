//! Common utilities shared across the services and the gateway.
//!
//! This crate provides:
//! - Unified error handling with HTTP rendering
//! - Configuration structures loaded from the environment

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
