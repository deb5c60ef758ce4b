#![allow(dead_code)]

use std::sync::Arc;
use yacut::application::services::LinkRegistry;
use yacut::domain::entities::NewLink;
use yacut::domain::repositories::LinkRepository;
use yacut::domain::{PolicySettings, ShortIdPolicy};
use yacut::infrastructure::persistence::InMemoryLinkRepository;
use yacut::state::AppState;

pub const BASE_URL: &str = "http://s.test";

pub fn create_test_state() -> (AppState, Arc<InMemoryLinkRepository>) {
    create_test_state_with_policy(ShortIdPolicy::default())
}

pub fn create_test_state_with_policy(
    policy: ShortIdPolicy,
) -> (AppState, Arc<InMemoryLinkRepository>) {
    let repository = Arc::new(InMemoryLinkRepository::new());
    let registry = Arc::new(LinkRegistry::new(repository.clone(), policy));

    let state = AppState::new(registry, Some(BASE_URL.to_string()));

    (state, repository)
}

/// Policy whose generator can only produce a single id: `a`.
pub fn single_id_policy() -> ShortIdPolicy {
    ShortIdPolicy::new(&PolicySettings {
        generated_length: 1,
        alphabet: "a".to_string(),
        ..PolicySettings::default()
    })
    .unwrap()
}

pub async fn create_test_link(repository: &InMemoryLinkRepository, short: &str, url: &str) {
    repository
        .create(NewLink::now(url.to_string(), short.to_string()))
        .await
        .unwrap();
}
