//! Browser-facing layer.
//!
//! Serves the link creation form, short link redirects and HTML error pages.
//! Uses Askama templates (`templates/`) for server-side rendering.
//!
//! # Modules
//!
//! - [`forms`] - Form payloads and their validation
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Route configuration

pub mod forms;
pub mod handlers;
pub mod routes;
