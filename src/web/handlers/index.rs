//! Main page: link creation form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};

use super::errors::server_error_page;
use crate::application::services::LinkRegistry;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::base_url::resolve_base_url;
use crate::web::forms::CreateLinkForm;

/// Template for the main page.
///
/// Renders `templates/index.html` with the submitted form values, validation
/// errors and, after a successful submission, the new short link.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub original_link: String,
    pub custom_id: String,
    pub max_short_length: usize,
    pub errors: Vec<String>,
    pub short_link: Option<String>,
}

impl IndexTemplate {
    fn new(form: CreateLinkForm, max_short_length: usize) -> Self {
        Self {
            original_link: form.original_link,
            custom_id: form.custom_id,
            max_short_length,
            errors: Vec::new(),
            short_link: None,
        }
    }

    fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = errors;
        self
    }

    fn with_short_link(mut self, short_link: String) -> Self {
        self.short_link = Some(short_link);
        self
    }
}

/// Renders the empty creation form.
///
/// # Endpoint
///
/// `GET /`
pub async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    IndexTemplate::new(
        CreateLinkForm::default(),
        state.registry.policy().max_short_length(),
    )
}

/// Handles a form submission.
///
/// # Endpoint
///
/// `POST /`
///
/// # Flow
///
/// 1. Validate the form (URL syntax included); on failure re-render with errors
/// 2. Create the link through the registry
/// 3. Re-render the form with the short link, or with the reason it failed
///
/// Validation failures and a taken custom id re-render the form with `200 OK`.
/// A server-side failure renders the 500 page.
pub async fn create_link_form_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    form: Result<Form<CreateLinkForm>, FormRejection>,
) -> Response {
    let policy = state.registry.policy();
    let max_short_length = policy.max_short_length();

    let form = match form {
        Ok(Form(form)) => form.trimmed(),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected form submission");
            let page = IndexTemplate::new(CreateLinkForm::default(), max_short_length)
                .with_errors(vec!["Invalid form submission".to_string()]);
            return (StatusCode::BAD_REQUEST, page).into_response();
        }
    };

    let errors = form.errors(policy);
    if !errors.is_empty() {
        return IndexTemplate::new(form, max_short_length)
            .with_errors(errors)
            .into_response();
    }

    let base_url = match resolve_base_url(&headers, state.base_url.as_deref()) {
        Ok(base_url) => base_url,
        Err(e) => {
            let page = IndexTemplate::new(form, max_short_length).with_errors(vec![e.to_string()]);
            return (StatusCode::BAD_REQUEST, page).into_response();
        }
    };

    let result = state
        .registry
        .create_link(&form.original_link, form.custom_id())
        .await;

    match result {
        Ok(link) => {
            let short_link = LinkRegistry::build_short_url(&link, &base_url);
            IndexTemplate::new(form, max_short_length)
                .with_short_link(short_link)
                .into_response()
        }
        Err(e @ (AppError::InvalidInput(_) | AppError::Conflict(_))) => {
            IndexTemplate::new(form, max_short_length)
                .with_errors(vec![e.to_string()])
                .into_response()
        }
        Err(e) => server_error_page(&e),
    }
}
