//! Short id shape rules and random candidate generation.
//!
//! [`ShortIdPolicy`] is pure: it never touches storage. Uniqueness of generated
//! candidates is enforced by [`crate::application::services::LinkRegistry`].

use rand::Rng;
use regex::Regex;

/// Default maximum length of an original URL.
pub const DEFAULT_URL_MAX_LENGTH: usize = 256;
/// Default maximum length of a short id (custom or generated).
pub const DEFAULT_SHORT_ID_MAX_LENGTH: usize = 16;
/// Default length of generated short ids.
pub const DEFAULT_SHORT_ID_GEN_LENGTH: usize = 6;
/// Default number of generated candidates tried before giving up.
pub const DEFAULT_MAX_GEN_ATTEMPTS: usize = 10;
/// Default generation alphabet: ASCII letters and digits.
pub const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
/// Default pattern a custom short id must fully match.
pub const DEFAULT_CUSTOM_ID_PATTERN: &str = "[A-Za-z0-9]+";

/// Raw policy settings, as loaded from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySettings {
    pub max_url_length: usize,
    pub max_short_length: usize,
    pub generated_length: usize,
    pub max_gen_attempts: usize,
    pub alphabet: String,
    pub custom_id_pattern: String,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            max_url_length: DEFAULT_URL_MAX_LENGTH,
            max_short_length: DEFAULT_SHORT_ID_MAX_LENGTH,
            generated_length: DEFAULT_SHORT_ID_GEN_LENGTH,
            max_gen_attempts: DEFAULT_MAX_GEN_ATTEMPTS,
            alphabet: DEFAULT_ALPHABET.to_string(),
            custom_id_pattern: DEFAULT_CUSTOM_ID_PATTERN.to_string(),
        }
    }
}

/// Reasons a [`PolicySettings`] value cannot become a [`ShortIdPolicy`].
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("{0} must be at least 1")]
    Zero(&'static str),

    #[error("generated short id length ({generated}) exceeds the maximum short id length ({max})")]
    GeneratedTooLong { generated: usize, max: usize },

    #[error("alphabet must not be empty")]
    EmptyAlphabet,

    #[error("alphabet character {0:?} is rejected by the custom id pattern")]
    AlphabetRejected(char),

    #[error("invalid custom id pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Validation and generation rules for short ids and original URLs.
#[derive(Debug, Clone)]
pub struct ShortIdPolicy {
    max_url_length: usize,
    max_short_length: usize,
    generated_length: usize,
    max_gen_attempts: usize,
    alphabet: Vec<char>,
    custom_id_pattern: Regex,
}

impl ShortIdPolicy {
    /// Builds a policy from settings, rejecting inconsistent combinations.
    ///
    /// # Errors
    ///
    /// Returns a [`PolicyError`] if a length or attempt count is zero, the
    /// generated length exceeds the maximum short id length, the alphabet is
    /// empty, the pattern does not compile, or the pattern rejects a character
    /// of the alphabet (generated ids must always be valid custom ids too).
    pub fn new(settings: &PolicySettings) -> Result<Self, PolicyError> {
        if settings.max_url_length == 0 {
            return Err(PolicyError::Zero("URL_MAX_LENGTH"));
        }
        if settings.max_short_length == 0 {
            return Err(PolicyError::Zero("SHORT_ID_MAX_LENGTH"));
        }
        if settings.generated_length == 0 {
            return Err(PolicyError::Zero("SHORT_ID_GEN_LENGTH"));
        }
        if settings.max_gen_attempts == 0 {
            return Err(PolicyError::Zero("MAX_GEN_ATTEMPTS"));
        }
        if settings.generated_length > settings.max_short_length {
            return Err(PolicyError::GeneratedTooLong {
                generated: settings.generated_length,
                max: settings.max_short_length,
            });
        }

        let alphabet: Vec<char> = settings.alphabet.chars().collect();
        if alphabet.is_empty() {
            return Err(PolicyError::EmptyAlphabet);
        }

        let custom_id_pattern = Regex::new(&format!("^(?:{})$", settings.custom_id_pattern))?;

        if let Some(&rejected) = alphabet
            .iter()
            .find(|c| !custom_id_pattern.is_match(c.encode_utf8(&mut [0; 4])))
        {
            return Err(PolicyError::AlphabetRejected(rejected));
        }

        Ok(Self {
            max_url_length: settings.max_url_length,
            max_short_length: settings.max_short_length,
            generated_length: settings.generated_length,
            max_gen_attempts: settings.max_gen_attempts,
            alphabet,
            custom_id_pattern,
        })
    }

    pub fn max_url_length(&self) -> usize {
        self.max_url_length
    }

    pub fn max_short_length(&self) -> usize {
        self.max_short_length
    }

    pub fn generated_length(&self) -> usize {
        self.generated_length
    }

    pub fn max_gen_attempts(&self) -> usize {
        self.max_gen_attempts
    }

    /// Checks a caller-chosen short id.
    ///
    /// The candidate must be non-empty, at most `max_short_length` characters
    /// long and fully match the custom id pattern. No trimming is done here.
    pub fn is_valid_custom_id(&self, candidate: &str) -> bool {
        !candidate.is_empty()
            && candidate.chars().count() <= self.max_short_length
            && self.custom_id_pattern.is_match(candidate)
    }

    /// Generates `length` characters drawn uniformly from the alphabet.
    ///
    /// The result is not guaranteed to be unique.
    pub fn generate_candidate(&self, length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect()
    }

    /// Checks the emptiness and length of an original URL after trimming.
    ///
    /// This is not a syntax check.
    pub fn is_valid_url(&self, url: &str) -> bool {
        let trimmed = url.trim();
        !trimmed.is_empty() && trimmed.chars().count() <= self.max_url_length
    }
}

impl Default for ShortIdPolicy {
    fn default() -> Self {
        Self {
            max_url_length: DEFAULT_URL_MAX_LENGTH,
            max_short_length: DEFAULT_SHORT_ID_MAX_LENGTH,
            generated_length: DEFAULT_SHORT_ID_GEN_LENGTH,
            max_gen_attempts: DEFAULT_MAX_GEN_ATTEMPTS,
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            custom_id_pattern: Regex::new(r"^(?:[A-Za-z0-9]+)$")
                .expect("default custom id pattern is valid"),
        }
    }
}
