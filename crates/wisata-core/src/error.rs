//! Error types for site startup and form validation.

use thiserror::Error;

/// Failures while bringing the site up.
///
/// None of these are fatal to the page: the web entry point logs them and
/// continues with defaults or skips the affected component.
#[derive(Debug, Clone, Error)]
pub enum SiteError {
    /// Configuration could not be parsed or holds an unusable value.
    #[error("invalid config: {0}")]
    Config(String),

    /// The host environment is missing something every component needs
    /// (window, document, body).
    #[error("dom unavailable: {0}")]
    Dom(String),
}

/// Contact form validation failures, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one of name, email or message is blank after trimming.
    #[error("one or more required fields are empty")]
    Incomplete,

    /// The email does not look like `local@domain.tld`.
    #[error("email address is malformed")]
    InvalidEmail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_error_display() {
        let err = SiteError::Config("slider interval must be positive".into());
        assert_eq!(
            err.to_string(),
            "invalid config: slider interval must be positive"
        );
    }
}
