//! Core domain entities.
//!
//! - [`Link`] - A stored short id → original URL mapping
//! - [`NewLink`] - Insert payload for a link that has no id yet

pub mod link;

pub use link::{Link, NewLink};
