//! JSON API layer.
//!
//! Translates HTTP requests into registry operations and formats responses as
//! JSON. Errors are rendered as `{ "message": ... }` bodies.
//!
//! # Modules
//!
//! - [`dto`] - Request/response serialization types
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
