//! Shared state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<LinkRegistry>,
    /// Public base URL of short links; `None` derives it from the `Host` header.
    pub base_url: Option<String>,
}

impl AppState {
    pub fn new(registry: Arc<LinkRegistry>, base_url: Option<String>) -> Self {
        Self { registry, base_url }
    }
}
