//! Application layer services implementing business logic.
//!
//! Services orchestrate domain rules and repository calls, and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_registry::LinkRegistry`] - Short link creation and lookup

pub mod services;
