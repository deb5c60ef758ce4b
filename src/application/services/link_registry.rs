//! Link creation and lookup.

use std::sync::Arc;

use crate::domain::ShortIdPolicy;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use tracing::{debug, info, warn};

/// Owns creation and lookup of short links.
///
/// The registry validates input with its [`ShortIdPolicy`], pre-checks short id
/// availability and inserts through the storage handle it was built with. The
/// pre-check is only a fast path: under concurrent creators the storage layer's
/// uniqueness check decides, and its rejection is reported as
/// [`AppError::Conflict`].
pub struct LinkRegistry {
    repository: Arc<dyn LinkRepository>,
    policy: ShortIdPolicy,
}

impl LinkRegistry {
    /// Creates a registry over a storage handle.
    pub fn new(repository: Arc<dyn LinkRepository>, policy: ShortIdPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &ShortIdPolicy {
        &self.policy
    }

    /// Creates a short link for `original`.
    ///
    /// With a `custom_short`, that id is validated and used as is. Without one,
    /// random candidates are generated until a free one is found or the attempt
    /// budget runs out. The stored URL is `original` with surrounding whitespace
    /// removed.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if the URL is empty or too long, or the custom
    ///   short id is malformed
    /// - [`AppError::Conflict`] if the custom short id is taken, or the insert lost
    ///   a race for the chosen id
    /// - [`AppError::ExhaustedRetries`] if every generated candidate collided
    /// - [`AppError::StorageFailure`] if storage fails
    pub async fn create_link(
        &self,
        original: &str,
        custom_short: Option<&str>,
    ) -> Result<Link, AppError> {
        if !self.policy.is_valid_url(original) {
            return Err(AppError::invalid_input(format!(
                "URL must be between 1 and {} characters",
                self.policy.max_url_length()
            )));
        }
        let original = original.trim();

        let short = match custom_short {
            Some(custom) => {
                if !self.policy.is_valid_custom_id(custom) {
                    return Err(AppError::invalid_input(format!(
                        "Invalid short id: use only Latin letters and digits, at most {} characters",
                        self.policy.max_short_length()
                    )));
                }

                if self.repository.exists(custom).await? {
                    return Err(taken(custom));
                }

                custom.to_string()
            }
            None => self.generate_unique_short().await?,
        };

        let link = self
            .repository
            .create(NewLink::now(original, short.as_str()))
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => {
                    warn!(short = %short, "Short id taken between check and insert");
                    taken(&short)
                }
                other => other,
            })?;

        info!(id = link.id, short = %link.short, "Link created");
        Ok(link)
    }

    /// Resolves a short id to its link.
    ///
    /// An unknown id is `Ok(None)`, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StorageFailure`] if storage fails.
    pub async fn resolve_short(&self, short: &str) -> Result<Option<Link>, AppError> {
        self.repository.find_by_short(short).await
    }

    /// Builds the shareable URL for a link: `{base_url}/{short}`.
    ///
    /// A trailing `/` on `base_url` is ignored.
    pub fn build_short_url(link: &Link, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), link.short)
    }

    /// Number of stored links.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Checks that storage is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Generates a short id not present in storage at the time of the check.
    async fn generate_unique_short(&self) -> Result<String, AppError> {
        let attempts = self.policy.max_gen_attempts();

        for attempt in 1..=attempts {
            let candidate = self
                .policy
                .generate_candidate(self.policy.generated_length());

            if !self.repository.exists(&candidate).await? {
                return Ok(candidate);
            }

            debug!(attempt, candidate = %candidate, "Generated short id collided");
        }

        warn!(attempts, "Could not generate a free short id");
        Err(AppError::ExhaustedRetries { attempts })
    }
}

fn taken(short: &str) -> AppError {
    AppError::conflict(format!("The proposed short id {short} already exists."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PolicySettings;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;

    fn stored(new_link: NewLink) -> Result<Link, AppError> {
        Ok(new_link.into_link(10))
    }

    fn registry(repository: MockLinkRepository) -> LinkRegistry {
        LinkRegistry::new(Arc::new(repository), ShortIdPolicy::default())
    }

    #[tokio::test]
    async fn test_create_link_generates_short_id() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_link| {
                new_link.short.len() == 6
                    && new_link.short.chars().all(|c| c.is_ascii_alphanumeric())
                    && new_link.original == "https://example.com"
            })
            .times(1)
            .returning(stored);

        let result = registry(mock_repo)
            .create_link("https://example.com", None)
            .await;

        let link = result.unwrap();
        assert_eq!(link.id, 10);
        assert_eq!(link.original, "https://example.com");
        assert_eq!(link.short.len(), 6);
    }

    #[tokio::test]
    async fn test_create_link_trims_original() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.original == "https://example.com/path")
            .times(1)
            .returning(stored);

        let link = registry(mock_repo)
            .create_link("  https://example.com/path \n", None)
            .await
            .unwrap();

        assert_eq!(link.original, "https://example.com/path");
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let mut mock_repo = MockLinkRepository::new();
        let mut calls = 0;

        mock_repo.expect_exists().times(3).returning(move |_| {
            calls += 1;
            Ok(calls < 3)
        });
        mock_repo.expect_create().times(1).returning(stored);

        let result = registry(mock_repo)
            .create_link("https://example.com", None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_exhausts_retries() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(10).returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let result = registry(mock_repo)
            .create_link("https://example.com", None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ExhaustedRetries { attempts: 10 }
        ));
    }

    #[tokio::test]
    async fn test_create_link_respects_configured_attempts() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(3).returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let policy = ShortIdPolicy::new(&PolicySettings {
            max_gen_attempts: 3,
            ..PolicySettings::default()
        })
        .unwrap();
        let registry = LinkRegistry::new(Arc::new(mock_repo), policy);

        let result = registry.create_link("https://example.com", None).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ExhaustedRetries { attempts: 3 }
        ));
    }

    #[tokio::test]
    async fn test_create_link_with_custom_short() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|short| short == "abc123")
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .withf(|new_link| new_link.short == "abc123")
            .times(1)
            .returning(stored);

        let link = registry(mock_repo)
            .create_link("https://example.com", Some("abc123"))
            .await
            .unwrap();

        assert_eq!(link.short, "abc123");
    }

    #[tokio::test]
    async fn test_create_link_custom_short_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .withf(|short| short == "taken123")
            .times(1)
            .returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let result = registry(mock_repo)
            .create_link("https://example.com", Some("taken123"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(err.to_string().contains("taken123"));
    }

    #[tokio::test]
    async fn test_create_link_invalid_custom_short() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_exists().times(0);
        mock_repo.expect_create().times(0);

        let result = registry(mock_repo)
            .create_link("https://example.com", Some("bad id!"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_link_custom_short_too_long() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let result = registry(mock_repo)
            .create_link("https://example.com", Some("abcdefghijklmnopq"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_link_empty_url() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_exists().times(0);
        mock_repo.expect_create().times(0);

        let result = registry(mock_repo).create_link("   ", None).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_link_url_too_long() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_create().times(0);

        let long_url = format!("https://example.com/{}", "a".repeat(300));
        let result = registry(mock_repo).create_link(&long_url, None).await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_link_insert_race_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation")));

        let result = registry(mock_repo)
            .create_link("https://example.com", Some("racy1"))
            .await;

        let err = result.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(err.to_string().contains("racy1"));
    }

    #[tokio::test]
    async fn test_create_link_generated_insert_race_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::conflict("Unique constraint violation")));

        let result = registry(mock_repo)
            .create_link("https://example.com", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_create_link_storage_failure() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::storage("connection reset")));

        let result = registry(mock_repo)
            .create_link("https://example.com", None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::StorageFailure(_)));
    }

    #[tokio::test]
    async fn test_create_link_storage_failure_during_check() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_exists()
            .times(1)
            .returning(|_| Err(AppError::storage("timeout")));
        mock_repo.expect_create().times(0);

        let result = registry(mock_repo)
            .create_link("https://example.com", Some("abc123"))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::StorageFailure(_)));
    }

    #[tokio::test]
    async fn test_resolve_short_found() {
        let mut mock_repo = MockLinkRepository::new();
        let link = Link::new(
            5,
            "https://example.com".to_string(),
            "abc123".to_string(),
            Utc::now(),
        );

        mock_repo
            .expect_find_by_short()
            .withf(|short| short == "abc123")
            .times(2)
            .returning(move |_| Ok(Some(link.clone())));

        let registry = registry(mock_repo);
        let first = registry.resolve_short("abc123").await.unwrap();
        let second = registry.resolve_short("abc123").await.unwrap();

        assert_eq!(first.as_ref().map(|l| l.original.as_str()), Some("https://example.com"));
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_short_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_by_short()
            .times(1)
            .returning(|_| Ok(None));

        let result = registry(mock_repo).resolve_short("missing").await;

        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_build_short_url() {
        let link = Link::new(
            1,
            "https://example.com".to_string(),
            "abc123".to_string(),
            Utc::now(),
        );

        assert_eq!(
            LinkRegistry::build_short_url(&link, "http://localhost:3000"),
            "http://localhost:3000/abc123"
        );
        assert_eq!(
            LinkRegistry::build_short_url(&link, "https://s.example.com/"),
            "https://s.example.com/abc123"
        );
    }
}
