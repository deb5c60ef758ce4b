//! Link creation form submitted from the main page.

use serde::Deserialize;
use std::borrow::Cow;
use url::{Host, Url};
use validator::{Validate, ValidationError};

use crate::domain::ShortIdPolicy;

/// Fields of the link creation form.
///
/// Unlike the JSON API, the form requires a syntactically valid URL.
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct CreateLinkForm {
    #[serde(default)]
    #[validate(custom(function = "validate_web_url"))]
    pub original_link: String,

    #[serde(default)]
    pub custom_id: String,
}

impl CreateLinkForm {
    /// Returns a copy with surrounding whitespace removed from every field.
    pub fn trimmed(&self) -> Self {
        Self {
            original_link: self.original_link.trim().to_string(),
            custom_id: self.custom_id.trim().to_string(),
        }
    }

    /// The custom id, or `None` when the field was left blank.
    pub fn custom_id(&self) -> Option<&str> {
        Some(self.custom_id.as_str()).filter(|id| !id.is_empty())
    }

    /// Validates the form, returning one message per failed rule.
    ///
    /// Expects a [`trimmed`](Self::trimmed) form.
    pub fn errors(&self, policy: &ShortIdPolicy) -> Vec<String> {
        let mut errors = Vec::new();

        if self.original_link.is_empty() {
            errors.push("This field is required".to_string());
        } else {
            if let Err(validation) = self.validate() {
                for field_errors in validation.field_errors().values() {
                    errors.extend(
                        field_errors
                            .iter()
                            .filter_map(|e| e.message.as_ref().map(|m| m.to_string())),
                    );
                }
            }

            if self.original_link.chars().count() > policy.max_url_length() {
                errors.push(format!(
                    "URL must be between 1 and {} characters",
                    policy.max_url_length()
                ));
            }
        }

        if let Some(custom_id) = self.custom_id() {
            if custom_id.chars().count() > policy.max_short_length() {
                errors.push(format!(
                    "Short id must not exceed {} characters",
                    policy.max_short_length()
                ));
            } else if !policy.is_valid_custom_id(custom_id) {
                errors.push("Use only Latin letters and digits".to_string());
            }
        }

        errors
    }
}

/// Accepts absolute URLs of the form `scheme://host...` whose host is an IP
/// address or a domain with a top-level part.
///
/// `javascript:`, `mailto:` and other URLs without an authority are rejected.
fn validate_web_url(value: &str) -> Result<(), ValidationError> {
    let invalid =
        || ValidationError::new("url").with_message(Cow::Borrowed("Invalid URL format"));

    let parsed = Url::parse(value).map_err(|_| invalid())?;
    let has_authority = value
        .get(parsed.scheme().len()..)
        .is_some_and(|rest| rest.starts_with("://"));
    if !has_authority {
        return Err(invalid());
    }

    match parsed.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.');
            match domain.rsplit_once('.') {
                Some((name, tld)) if !name.is_empty() && !tld.is_empty() => Ok(()),
                _ => Err(invalid()),
            }
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        None => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(original_link: &str, custom_id: &str) -> CreateLinkForm {
        CreateLinkForm {
            original_link: original_link.to_string(),
            custom_id: custom_id.to_string(),
        }
        .trimmed()
    }

    #[test]
    fn test_valid_form() {
        let policy = ShortIdPolicy::default();
        assert!(form("https://example.com", "").errors(&policy).is_empty());
        assert!(form("https://example.com", "abc123").errors(&policy).is_empty());
    }

    #[test]
    fn test_missing_original_link() {
        let policy = ShortIdPolicy::default();
        assert_eq!(
            form("  ", "").errors(&policy),
            vec!["This field is required".to_string()]
        );
    }

    #[test]
    fn test_original_link_must_be_url() {
        let policy = ShortIdPolicy::default();
        assert_eq!(
            form("not a url", "").errors(&policy),
            vec!["Invalid URL format".to_string()]
        );
    }

    #[test]
    fn test_original_link_needs_authority() {
        let policy = ShortIdPolicy::default();

        for url in [
            "javascript:alert(1)",
            "mailto:a@b.com",
            "foo:bar",
            "localhost:3000",
            "data:text/html,hello",
        ] {
            assert_eq!(
                form(url, "").errors(&policy),
                vec!["Invalid URL format".to_string()],
                "{url} should be rejected"
            );
        }
    }

    #[test]
    fn test_original_link_needs_top_level_domain() {
        let policy = ShortIdPolicy::default();
        assert_eq!(
            form("http://localhost/path", "").errors(&policy),
            vec!["Invalid URL format".to_string()]
        );
    }

    #[test]
    fn test_original_link_accepts_web_urls() {
        let policy = ShortIdPolicy::default();

        for url in [
            "http://example.com",
            "https://sub.example.co.uk/a/b?c=d#e",
            "https://example.com:8443/",
            "ftp://files.example.org/pub",
            "http://127.0.0.1:3000/",
            "http://[::1]/",
        ] {
            assert!(form(url, "").errors(&policy).is_empty(), "{url} should be accepted");
        }
    }

    #[test]
    fn test_original_link_too_long() {
        let policy = ShortIdPolicy::default();
        let url = format!("https://example.com/{}", "a".repeat(300));

        let errors = form(&url, "").errors(&policy);
        assert_eq!(errors, vec!["URL must be between 1 and 256 characters".to_string()]);
    }

    #[test]
    fn test_custom_id_charset() {
        let policy = ShortIdPolicy::default();
        assert_eq!(
            form("https://example.com", "bad id!").errors(&policy),
            vec!["Use only Latin letters and digits".to_string()]
        );
    }

    #[test]
    fn test_custom_id_too_long() {
        let policy = ShortIdPolicy::default();
        assert_eq!(
            form("https://example.com", "abcdefghijklmnopq").errors(&policy),
            vec!["Short id must not exceed 16 characters".to_string()]
        );
    }

    #[test]
    fn test_blank_custom_id_is_absent() {
        assert_eq!(form("https://example.com", "   ").custom_id(), None);
        assert_eq!(form("https://example.com", " abc ").custom_id(), Some("abc"));
    }
}
