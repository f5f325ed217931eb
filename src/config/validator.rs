//! Configuration validation rules.
//!
//! - Page sizes and the request timeout must be positive
//! - `remote.base_url`, when set, must be an http(s) URL

use reqwest::Url;

use crate::config::schema::FilmixoConfig;
use crate::error::{FilmixoError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending setting.
    pub field: String,
    /// Human-readable error message.
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return every error found.
pub fn validate_config(config: &FilmixoConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let positive = [
        ("feed.initial_load", config.feed.initial_load as u64),
        ("feed.batch_size", config.feed.batch_size as u64),
        ("category.page_size", config.category.page_size as u64),
        ("remote.timeout_secs", config.remote.timeout_secs),
    ];
    for (field, value) in positive {
        if value == 0 {
            errors.push(ValidationError::new(
                field,
                format!("'{}' must be greater than zero", field),
            ));
        }
    }

    if let Some(raw) = &config.remote.base_url {
        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::new(
                "remote.base_url",
                format!("'remote.base_url' must use http or https, got '{}'", url.scheme()),
            )),
            Err(e) => errors.push(ValidationError::new(
                "remote.base_url",
                format!("'remote.base_url' is not a valid URL: {}", e),
            )),
        }
    }

    errors
}

/// Validate a configuration, folding all errors into one.
pub fn validate(config: &FilmixoConfig) -> Result<()> {
    let errors = validate_config(config);

    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
        Err(FilmixoError::ConfigValidationError {
            message: messages.join("; "),
        })
    }
}
