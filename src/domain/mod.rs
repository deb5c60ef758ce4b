//! Domain layer containing business entities and rules.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`short_id_policy`] - Short id validation and generation rules
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.

pub mod entities;
pub mod repositories;
pub mod short_id_policy;

pub use short_id_policy::{PolicySettings, ShortIdPolicy};
