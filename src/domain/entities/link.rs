//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored mapping from a short id to its original URL.
///
/// Records are created once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, original: String, short: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original,
            short,
            created_at,
        }
    }
}

/// Input data for inserting a new link.
///
/// `id` is assigned by the storage layer; `created_at` is set by the registry.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
}

impl NewLink {
    /// Builds an insert payload stamped with the current time.
    pub fn now(original: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            short: short.into(),
            created_at: Utc::now(),
        }
    }

    /// Materializes the stored record once storage has assigned an id.
    pub fn into_link(self, id: i64) -> Link {
        Link::new(id, self.original, self.short, self.created_at)
    }
}
