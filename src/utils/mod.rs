//! Helper functions used by the HTTP layers.
//!
//! - [`base_url`] - Base URL resolution for short links

pub mod base_url;
