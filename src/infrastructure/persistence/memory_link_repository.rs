//! In-memory implementation of link repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Process-local link storage keyed by short id.
///
/// Insert-if-absent goes through [`DashMap::entry`], which holds the shard lock
/// for the key, so two concurrent inserts of the same short id cannot both
/// succeed. Contents are lost when the process exits.
#[derive(Debug)]
pub struct InMemoryLinkRepository {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl InMemoryLinkRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryLinkRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        match self.links.entry(new_link.short.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Unique constraint violation: short id {} already exists",
                new_link.short
            ))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let link = new_link.into_link(id);
                slot.insert(link.clone());
                Ok(link)
            }
        }
    }

    async fn find_by_short(&self, short: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.get(short).map(|entry| entry.value().clone()))
    }

    async fn exists(&self, short: &str) -> Result<bool, AppError> {
        Ok(self.links.contains_key(short))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.links.len() as i64)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = InMemoryLinkRepository::new();

        let first = repo
            .create(NewLink::now("https://example.com/1", "one"))
            .await
            .unwrap();
        let second = repo
            .create(NewLink::now("https://example.com/2", "two"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_create_duplicate_short_is_conflict() {
        let repo = InMemoryLinkRepository::new();

        repo.create(NewLink::now("https://first.com", "abc123"))
            .await
            .unwrap();
        let result = repo
            .create(NewLink::now("https://second.com", "abc123"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));

        let stored = repo.find_by_short("abc123").await.unwrap().unwrap();
        assert_eq!(stored.original, "https://first.com");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_short_not_found() {
        let repo = InMemoryLinkRepository::new();

        assert!(repo.find_by_short("missing").await.unwrap().is_none());
        assert!(!repo.exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_short_ids_are_case_sensitive() {
        let repo = InMemoryLinkRepository::new();

        repo.create(NewLink::now("https://lower.com", "abc"))
            .await
            .unwrap();
        repo.create(NewLink::now("https://upper.com", "ABC"))
            .await
            .unwrap();

        let upper = repo.find_by_short("ABC").await.unwrap().unwrap();
        assert_eq!(upper.original, "https://upper.com");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_inserts_of_same_short_have_one_winner() {
        let repo = Arc::new(InMemoryLinkRepository::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.create(NewLink::now(format!("https://example.com/{i}"), "same"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, 15);
        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
