//! HTTP service exposing current weather by coordinates.
//!
//! This crate focuses on:
//! - Environment-variable configuration
//! - Router wiring, logging/auth middleware, graceful shutdown
//! - Query validation and the JSON response envelope

pub mod config;
pub mod handler;
pub mod middleware;
pub mod response;
pub mod routes;

pub use config::Config;
pub use handler::AppState;
